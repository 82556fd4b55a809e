use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::judge::{AccuracyTier, FeedbackLabel};

pub const MIN_HEALTH: f64 = 0.0;
pub const MAX_HEALTH: f64 = 100.0;

/// Clamp a health value into [MIN_HEALTH, MAX_HEALTH].
pub fn clamp_health(health: f64) -> f64 {
    if health.is_nan() {
        MIN_HEALTH
    } else {
        health.clamp(MIN_HEALTH, MAX_HEALTH)
    }
}

/// Mutable state of one play session.
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub score: u64,
    pub combo: u32,
    /// Never decreases within a run.
    pub max_combo: u32,
    /// Always within [MIN_HEALTH, MAX_HEALTH].
    pub health: f64,
    pub perfect: u32,
    pub good: u32,
    pub almost: u32,
    pub missed: u32,
    /// Perfect + good + almost + missed resolutions.
    pub total_processed: u32,
    /// Advisory "too early" presses. Not part of `total_processed`.
    pub early: u32,
    /// Lanes whose key is currently down.
    pub held_lanes: BTreeSet<usize>,
}

impl RunState {
    pub fn new(initial_health: f64) -> Self {
        Self {
            score: 0,
            combo: 0,
            max_combo: 0,
            health: clamp_health(initial_health),
            perfect: 0,
            good: 0,
            almost: 0,
            missed: 0,
            total_processed: 0,
            early: 0,
            held_lanes: BTreeSet::new(),
        }
    }

    /// Reset to the initial values.
    pub fn reset(&mut self, initial_health: f64) {
        *self = Self::new(initial_health);
    }

    /// Percentage of processed notes that were not missed. 0 when nothing was processed.
    pub fn accuracy(&self) -> f64 {
        if self.total_processed == 0 {
            return 0.0;
        }
        let landed = self.perfect + self.good + self.almost;
        landed as f64 / self.total_processed as f64 * 100.0
    }

    /// Count for a tier. Early reports the advisory counter.
    pub fn count(&self, tier: AccuracyTier) -> u32 {
        match tier {
            AccuracyTier::Perfect => self.perfect,
            AccuracyTier::Good => self.good,
            AccuracyTier::Almost => self.almost,
            AccuracyTier::Miss => self.missed,
            AccuracyTier::Early => self.early,
        }
    }

    pub fn is_lane_held(&self, lane: usize) -> bool {
        self.held_lanes.contains(&lane)
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new(MAX_HEALTH)
    }
}

/// Overlay feedback for the latest resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub tier: AccuracyTier,
    pub label: FeedbackLabel,
    pub color: [u8; 3],
    pub timing_offset: f64,
    /// Increments on every resolution so identical feedback can retrigger its animation.
    pub sequence: u64,
}

impl Feedback {
    pub fn text(&self) -> &'static str {
        self.label.text()
    }
}
