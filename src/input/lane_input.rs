use crate::model::LaneLayout;

use super::key_state::KeyState;

/// Maps key symbols to lanes and filters key auto-repeat.
#[derive(Debug, Clone)]
pub struct LaneInput {
    layout: LaneLayout,
    keys: Vec<KeyState>,
}

impl LaneInput {
    pub fn new(layout: LaneLayout) -> Self {
        let keys = vec![KeyState::new(); layout.lane_count()];
        Self { layout, keys }
    }

    pub fn layout(&self) -> &LaneLayout {
        &self.layout
    }

    pub fn lane_for_key(&self, key: char) -> Option<usize> {
        self.layout.lane_for_key(key)
    }

    /// Key-down on `lane`. False for unknown lanes and for repeats of a held key.
    pub fn on_press(&mut self, lane: usize, time: f64) -> bool {
        self.keys
            .get_mut(lane)
            .is_some_and(|key| key.on_press(time))
    }

    /// Key-up on `lane`. Returns the hold duration, or None if the key was not down.
    pub fn on_release(&mut self, lane: usize, time: f64) -> Option<f64> {
        self.keys.get_mut(lane)?.on_release(time)
    }

    pub fn is_pressed(&self, lane: usize) -> bool {
        self.keys.get(lane).is_some_and(|key| key.pressed)
    }

    /// Release every key without reporting.
    pub fn reset(&mut self) {
        self.keys.fill(KeyState::new());
    }
}
