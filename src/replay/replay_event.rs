use serde::{Deserialize, Serialize};

use crate::model::NoteId;
use crate::play::AccuracyTier;

/// One entry of the replay stream. `time` is session time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    KeyDown {
        time: f64,
        lane: usize,
    },
    KeyUp {
        time: f64,
        lane: usize,
        /// How long the key was down.
        held_for: f64,
    },
    NoteHit {
        time: f64,
        note: NoteId,
        lane: usize,
        tier: AccuracyTier,
        offset: f64,
        score_delta: u64,
        health_delta: f64,
    },
    /// A miss, either from a press with nothing reachable (`note` is None)
    /// or a note that travelled past the hit zone.
    NoteMiss {
        time: f64,
        note: Option<NoteId>,
        lane: usize,
        offset: f64,
        health_delta: f64,
    },
}

impl ReplayEvent {
    pub fn time(&self) -> f64 {
        match self {
            Self::KeyDown { time, .. }
            | Self::KeyUp { time, .. }
            | Self::NoteHit { time, .. }
            | Self::NoteMiss { time, .. } => *time,
        }
    }

    pub fn lane(&self) -> usize {
        match self {
            Self::KeyDown { lane, .. }
            | Self::KeyUp { lane, .. }
            | Self::NoteHit { lane, .. }
            | Self::NoteMiss { lane, .. } => *lane,
        }
    }
}
