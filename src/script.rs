//! Scripted sessions for headless runs.
//!
//! A script is a JSON list of steps applied in order to a [`PlaySession`]:
//!
//! ```json
//! { "steps": [
//!     { "op": "spawn", "lane": 0, "position": 1.6 },
//!     { "op": "tick", "dt": 1.0 },
//!     { "op": "key_down", "key": "a" },
//!     { "op": "key_up", "key": "a" }
//! ] }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::play::PlaySession;
use crate::replay::ReplaySink;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Spawn {
        lane: usize,
        position: f64,
        #[serde(default)]
        beats: f64,
        #[serde(default)]
        paused: bool,
    },
    KeyDown {
        key: char,
    },
    KeyUp {
        key: char,
    },
    Tick {
        dt: f64,
    },
    Complexity {
        value: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    pub steps: Vec<ScriptStep>,
}

impl SessionScript {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse script: {}", path.display()))
    }

    /// Apply every step to `session`. Starts the session if it is still Ready.
    ///
    /// Stops at the first spawn the session rejects.
    pub fn run<S: ReplaySink>(&self, session: &mut PlaySession<S>) -> Result<()> {
        session.start();
        for (index, step) in self.steps.iter().enumerate() {
            match *step {
                ScriptStep::Spawn {
                    lane,
                    position,
                    beats,
                    paused,
                } => {
                    let spawned = if paused {
                        session.spawn_paused(lane, position, beats)
                    } else {
                        session.spawn(lane, position, beats)
                    };
                    spawned.with_context(|| format!("step {index}: spawn rejected"))?;
                }
                ScriptStep::KeyDown { key } => {
                    session.key_down(key);
                }
                ScriptStep::KeyUp { key } => {
                    session.key_up(key);
                }
                ScriptStep::Tick { dt } => {
                    session.tick(dt);
                }
                ScriptStep::Complexity { value } => session.set_complexity(value),
            }
        }
        tracing::debug!("script applied {} steps", self.steps.len());
        Ok(())
    }
}
