use serde::{Deserialize, Serialize};

use crate::util::error::EngineError;

/// Lane → key mapping for a session. The lane count is the number of keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaneLayout {
    keys: Vec<char>,
}

impl LaneLayout {
    /// Build a layout, rejecting empty or duplicate key sets.
    /// Keys compare case-insensitively.
    pub fn new(keys: Vec<char>) -> Result<Self, EngineError> {
        let layout = Self { keys };
        layout.validate()?;
        Ok(layout)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.keys.is_empty() {
            return Err(EngineError::EmptyLaneLayout);
        }
        for (i, key) in self.keys.iter().enumerate() {
            let folded = fold(*key);
            if self.keys[..i].iter().any(|k| fold(*k) == folded) {
                return Err(EngineError::DuplicateLaneKey { key: *key });
            }
        }
        Ok(())
    }

    pub fn lane_count(&self) -> usize {
        self.keys.len()
    }

    /// Lane bound to `key`, if any.
    pub fn lane_for_key(&self, key: char) -> Option<usize> {
        let folded = fold(key);
        self.keys.iter().position(|k| fold(*k) == folded)
    }

    /// Key symbol shown on notes in `lane`.
    pub fn key_for_lane(&self, lane: usize) -> Option<char> {
        self.keys.get(lane).copied()
    }

    pub fn keys(&self) -> &[char] {
        &self.keys
    }
}

impl Default for LaneLayout {
    fn default() -> Self {
        Self {
            keys: vec!['a', 's', 'd', 'f', 'j', 'k', 'l', ';'],
        }
    }
}

fn fold(key: char) -> char {
    key.to_ascii_lowercase()
}
