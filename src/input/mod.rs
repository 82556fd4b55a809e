//! Lane key handling.
//!
//! This module provides:
//! - [`LaneInput`]: key → lane mapping with auto-repeat suppression
//! - [`KeyState`]: Individual key state with timestamps

mod key_state;
mod lane_input;

pub use key_state::KeyState;
pub use lane_input::LaneInput;
