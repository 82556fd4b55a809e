//! Play engine: complexity scaling, note timeline, hit resolution and scoring.

pub mod complexity;
pub mod judge;
pub mod run_state;
pub mod score;
pub mod session;
pub mod timeline;

pub use complexity::{ComplexityBand, ComplexityConfig, ComplexityManager, TimingWindows};
pub use judge::{AccuracyResult, AccuracyTier, FeedbackLabel, InputResolver, Resolution};
pub use run_state::{Feedback, MAX_HEALTH, MIN_HEALTH, RunState};
pub use score::ScoringEngine;
pub use session::{PlaySession, RunSnapshot, SessionPhase};
pub use timeline::NoteTimeline;
