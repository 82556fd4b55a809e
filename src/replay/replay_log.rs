use super::replay_event::ReplayEvent;

/// Append-only consumer of a session's replay stream.
pub trait ReplaySink {
    /// Record the next event. Events arrive in session order.
    fn record(&mut self, event: ReplayEvent);

    /// The session was reset; a new stream starts.
    fn reset(&mut self) {}
}

/// Sink that keeps events in memory.
#[derive(Debug, Default, Clone)]
pub struct ReplayLog {
    events: Vec<ReplayEvent>,
}

impl ReplayLog {
    /// Create a new replay log with pre-allocated capacity.
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(4096),
        }
    }

    /// Get all recorded events.
    pub fn events(&self) -> &[ReplayEvent] {
        &self.events
    }

    /// Take ownership of events (consumes the log).
    pub fn into_events(self) -> Vec<ReplayEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl ReplaySink for ReplayLog {
    fn record(&mut self, event: ReplayEvent) {
        self.events.push(event);
    }

    fn reset(&mut self) {
        self.events.clear();
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReplaySink for NullSink {
    fn record(&mut self, _event: ReplayEvent) {}
}

impl<S: ReplaySink + ?Sized> ReplaySink for &mut S {
    fn record(&mut self, event: ReplayEvent) {
        (**self).record(event);
    }

    fn reset(&mut self) {
        (**self).reset();
    }
}
