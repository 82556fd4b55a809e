use thiserror::Error;

/// Errors raised when building a session or spawning notes.
///
/// "Nothing to hit" is never an error; it resolves to the Miss or Early tier.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Lane layout must bind at least one key")]
    EmptyLaneLayout,

    #[error("Key {key:?} is bound to more than one lane")]
    DuplicateLaneKey { key: char },

    #[error("Lane {lane} is out of range (lane count {lane_count})")]
    LaneOutOfRange { lane: usize, lane_count: usize },

    #[error("Invalid note duration: {0}")]
    InvalidDuration(f64),

    #[error("Invalid travel position: {0}")]
    InvalidTravelPosition(f64),

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),
}
