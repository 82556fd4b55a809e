//! Test utilities for building notes and sessions.
//!
//! This module provides helpers for creating test fixtures in a fluent manner.

#[cfg(test)]
pub mod builders {
    use crate::model::{Note, NoteId, NoteState};

    /// Builder for creating test notes.
    #[derive(Debug, Clone)]
    pub struct NoteBuilder {
        id: NoteId,
        lane: usize,
        letter: char,
        travel_position: f64,
        duration_beats: f64,
        state: NoteState,
    }

    impl NoteBuilder {
        /// Create a tap note builder.
        pub fn tap(lane: usize, travel_position: f64) -> Self {
            Self {
                id: NoteId(0),
                lane,
                letter: 'a',
                travel_position,
                duration_beats: 0.0,
                state: NoteState::Pending,
            }
        }

        /// Create a hold note builder.
        pub fn hold(lane: usize, travel_position: f64, beats: f64) -> Self {
            Self {
                duration_beats: beats,
                ..Self::tap(lane, travel_position)
            }
        }

        pub fn id(mut self, id: u64) -> Self {
            self.id = NoteId(id);
            self
        }

        pub fn state(mut self, state: NoteState) -> Self {
            self.state = state;
            self
        }

        pub fn paused(self) -> Self {
            self.state(NoteState::Paused)
        }

        /// Build the Note.
        pub fn build(self) -> Note {
            Note {
                id: self.id,
                lane: self.lane,
                letter: self.letter,
                travel_position: self.travel_position,
                duration_beats: self.duration_beats,
                state: self.state,
            }
        }
    }
}
