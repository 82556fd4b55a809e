//! Replay event stream and storage.

mod replay_event;
mod replay_log;
mod storage;

pub use replay_event::ReplayEvent;
pub use replay_log::{NullSink, ReplayLog, ReplaySink};
pub use storage::{REPLAY_VERSION, ReplayData, load_replay, save_replay};
