use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::input::LaneInput;
use crate::model::{NoteId, NoteState};
use crate::replay::{ReplayEvent, ReplayLog, ReplaySink};
use crate::util::error::EngineError;

use super::complexity::{ComplexityConfig, ComplexityManager};
use super::judge::{AccuracyResult, AccuracyTier, InputResolver, Resolution};
use super::run_state::{Feedback, MIN_HEALTH, RunState};
use super::score::ScoringEngine;
use super::timeline::NoteTimeline;

/// Lifecycle of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Ready,
    Playing,
    /// Song length elapsed.
    Finished,
    /// Health reached zero.
    Failed,
}

/// Read-only view for the overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSnapshot {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub health: f64,
    pub accuracy: f64,
    /// None when no song length is configured.
    pub time_remaining: Option<f64>,
    pub phase: SessionPhase,
    pub feedback: Option<Feedback>,
}

/// One engine instance: notes, run state, key tracking and the replay stream.
pub struct PlaySession<S: ReplaySink = ReplayLog> {
    config: EngineConfig,
    complexity: f64,
    timeline: NoteTimeline,
    run: RunState,
    input: LaneInput,
    sink: S,
    phase: SessionPhase,
    elapsed: f64,
    feedback: Option<Feedback>,
    feedback_seq: u64,
}

impl PlaySession<ReplayLog> {
    /// Session recording into an in-memory [`ReplayLog`].
    pub fn with_log(config: EngineConfig) -> Result<Self, EngineError> {
        Self::new(config, ReplayLog::new())
    }
}

impl<S: ReplaySink> PlaySession<S> {
    pub fn new(config: EngineConfig, sink: S) -> Result<Self, EngineError> {
        config.validate()?;
        let lane_count = config.lanes.lane_count();
        Ok(Self {
            complexity: ComplexityManager::clamp(config.complexity),
            timeline: NoteTimeline::new(lane_count),
            run: RunState::new(config.initial_health),
            input: LaneInput::new(config.lanes.clone()),
            sink,
            phase: SessionPhase::Ready,
            elapsed: 0.0,
            feedback: None,
            feedback_seq: 0,
            config,
        })
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Enter Playing. Returns false unless the session was Ready.
    pub fn start(&mut self) -> bool {
        if self.phase != SessionPhase::Ready {
            return false;
        }
        self.set_phase(SessionPhase::Playing);
        true
    }

    /// Back to Ready: notes cleared, run state zeroed, keys released, replay restarted.
    ///
    /// The current complexity is kept.
    pub fn reset(&mut self) {
        self.timeline.clear();
        self.run.reset(self.config.initial_health);
        self.input.reset();
        self.sink.reset();
        self.elapsed = 0.0;
        self.feedback = None;
        self.feedback_seq = 0;
        self.set_phase(SessionPhase::Ready);
    }

    pub fn set_complexity(&mut self, complexity: f64) {
        let clamped = ComplexityManager::clamp(complexity);
        if clamped != self.complexity {
            tracing::debug!("complexity {} -> {}", self.complexity, clamped);
        }
        self.complexity = clamped;
    }

    pub fn complexity(&self) -> f64 {
        self.complexity
    }

    /// Parameters for the current complexity. Re-derived on every call.
    pub fn complexity_config(&self) -> ComplexityConfig {
        ComplexityManager::config(self.complexity)
    }

    // ---------------------------------------------------------------------
    // Notes
    // ---------------------------------------------------------------------

    /// Spawn a pending note in `lane`, labelled with the lane's key.
    pub fn spawn(
        &mut self,
        lane: usize,
        travel_position: f64,
        duration_beats: f64,
    ) -> Result<NoteId, EngineError> {
        let letter = self.letter_for(lane)?;
        self.timeline
            .spawn(lane, letter, travel_position, duration_beats)
    }

    /// Spawn a note that waits for its key.
    pub fn spawn_paused(
        &mut self,
        lane: usize,
        travel_position: f64,
        duration_beats: f64,
    ) -> Result<NoteId, EngineError> {
        let letter = self.letter_for(lane)?;
        self.timeline
            .spawn_paused(lane, letter, travel_position, duration_beats)
    }

    fn letter_for(&self, lane: usize) -> Result<char, EngineError> {
        self.config
            .lanes
            .key_for_lane(lane)
            .ok_or(EngineError::LaneOutOfRange {
                lane,
                lane_count: self.config.lanes.lane_count(),
            })
    }

    /// Drop notes that reached a terminal state.
    pub fn prune_notes(&mut self) -> usize {
        self.timeline.prune()
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// Key-down by symbol. Unmapped keys are ignored.
    pub fn key_down(&mut self, key: char) -> Option<AccuracyResult> {
        let lane = self.input.lane_for_key(key)?;
        self.press_lane(lane)
    }

    /// Key-up by symbol. Returns the note finished by the release, if any.
    pub fn key_up(&mut self, key: char) -> Option<NoteId> {
        let lane = self.input.lane_for_key(key)?;
        self.release_lane(lane)
    }

    /// Resolve a press of `lane` and apply it.
    ///
    /// Returns None when not playing, for unknown lanes and for auto-repeat.
    pub fn press_lane(&mut self, lane: usize) -> Option<AccuracyResult> {
        if self.phase != SessionPhase::Playing || !self.input.on_press(lane, self.elapsed) {
            return None;
        }
        self.run.held_lanes.insert(lane);
        self.sink.record(ReplayEvent::KeyDown {
            time: self.elapsed,
            lane,
        });

        let config = self.complexity_config();
        let Resolution { target, result } = InputResolver::resolve(
            lane,
            self.timeline.notes(),
            &config,
            self.config.hit_zone_center,
            &self.config.geometry,
        );
        ScoringEngine::apply(&result, &mut self.run);

        if let Some(id) = target
            && let Some(next) = self.next_state(id, result.tier)
        {
            let marked = self.timeline.mark(id, next);
            debug_assert!(marked, "resolver targeted {id} but {next:?} was refused");
        }

        let time = self.elapsed;
        match (result.tier, target) {
            (AccuracyTier::Early, _) => {}
            (AccuracyTier::Miss, note) => self.sink.record(ReplayEvent::NoteMiss {
                time,
                note,
                lane,
                offset: result.timing_offset,
                health_delta: result.health_delta,
            }),
            (tier, Some(note)) => self.sink.record(ReplayEvent::NoteHit {
                time,
                note,
                lane,
                tier,
                offset: result.timing_offset,
                score_delta: result.score_delta,
                health_delta: result.health_delta,
            }),
            (_, None) => {}
        }

        tracing::debug!(
            "lane {lane}: {:?} offset {:.3} score {} combo {} health {:.1}",
            result.tier,
            result.timing_offset,
            self.run.score,
            self.run.combo,
            self.run.health
        );
        self.show_feedback(&result);
        self.check_health();
        Some(result)
    }

    /// Release `lane`. A note held in that lane becomes Processed.
    pub fn release_lane(&mut self, lane: usize) -> Option<NoteId> {
        if self.phase != SessionPhase::Playing {
            return None;
        }
        let held_for = self.input.on_release(lane, self.elapsed)?;
        self.run.held_lanes.remove(&lane);
        self.sink.record(ReplayEvent::KeyUp {
            time: self.elapsed,
            lane,
            held_for,
        });
        self.timeline.release_lane(lane)
    }

    /// Transition for a targeted note given the tier it was graded with.
    fn next_state(&self, id: NoteId, tier: AccuracyTier) -> Option<NoteState> {
        let note = self.timeline.get(id)?;
        let next = match tier {
            AccuracyTier::Early => return None,
            AccuracyTier::Miss => NoteState::Missed,
            _ if note.state == NoteState::Paused => NoteState::Hit,
            _ if note.is_hold() => NoteState::BeingHeld,
            _ => NoteState::Hit,
        };
        Some(next)
    }

    // ---------------------------------------------------------------------
    // Time
    // ---------------------------------------------------------------------

    /// Advance session time by `dt` seconds.
    ///
    /// Notes that travelled past the almost window are scored as misses.
    /// Returns their ids.
    pub fn tick(&mut self, dt: f64) -> Vec<NoteId> {
        if self.phase != SessionPhase::Playing || !(dt.is_finite() && dt > 0.0) {
            return Vec::new();
        }
        self.elapsed += dt;

        let config = self.complexity_config();
        let center = self.config.hit_zone_center;
        let missed = self.timeline.advance(dt, &config, center);

        for &id in &missed {
            let Some(note) = self.timeline.get(id) else {
                continue;
            };
            let lane = note.lane;
            let result = AccuracyResult::new(AccuracyTier::Miss, note.offset_from(center), &config);
            ScoringEngine::apply(&result, &mut self.run);
            self.sink.record(ReplayEvent::NoteMiss {
                time: self.elapsed,
                note: Some(id),
                lane,
                offset: result.timing_offset,
                health_delta: result.health_delta,
            });
            self.show_feedback(&result);
        }
        if !missed.is_empty() {
            tracing::debug!("{} note(s) passed the hit zone", missed.len());
        }

        self.check_health();
        if self.phase == SessionPhase::Playing
            && let Some(length) = self.config.song_length
            && self.elapsed >= length
        {
            self.set_phase(SessionPhase::Finished);
        }
        missed
    }

    fn show_feedback(&mut self, result: &AccuracyResult) {
        self.feedback_seq += 1;
        self.feedback = Some(Feedback {
            tier: result.tier,
            label: result.label,
            color: result.tier.color(),
            timing_offset: result.timing_offset,
            sequence: self.feedback_seq,
        });
    }

    fn check_health(&mut self) {
        if self.phase == SessionPhase::Playing
            && self.config.fail_on_zero_health
            && self.run.health <= MIN_HEALTH
        {
            self.set_phase(SessionPhase::Failed);
        }
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            tracing::info!(
                "session {:?} -> {:?} at {:.2}s (score {}, max combo {})",
                self.phase,
                phase,
                self.elapsed,
                self.run.score,
                self.run.max_combo
            );
        }
        self.phase = phase;
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            score: self.run.score,
            combo: self.run.combo,
            max_combo: self.run.max_combo,
            health: self.run.health,
            accuracy: self.run.accuracy(),
            time_remaining: self
                .config
                .song_length
                .map(|length| (length - self.elapsed).max(0.0)),
            phase: self.phase,
            feedback: self.feedback,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn timeline(&self) -> &NoteTimeline {
        &self.timeline
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Seconds of play time since start.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
