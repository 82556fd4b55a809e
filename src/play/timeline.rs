use crate::model::{Note, NoteId, NoteState};
use crate::util::error::EngineError;

use super::complexity::ComplexityConfig;

/// Owns the notes of a run, moves them toward the hit zone and enforces the
/// note state machine.
///
/// Notes are stored in spawn order, so ids are ascending.
#[derive(Debug, Clone)]
pub struct NoteTimeline {
    notes: Vec<Note>,
    lane_count: usize,
    next_id: u64,
}

impl NoteTimeline {
    pub fn new(lane_count: usize) -> Self {
        Self {
            notes: Vec::new(),
            lane_count,
            next_id: 0,
        }
    }

    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// Spawn a pending note.
    pub fn spawn(
        &mut self,
        lane: usize,
        letter: char,
        travel_position: f64,
        duration_beats: f64,
    ) -> Result<NoteId, EngineError> {
        self.insert(lane, letter, travel_position, duration_beats, NoteState::Pending)
    }

    /// Spawn a note that waits for its lane key regardless of position.
    pub fn spawn_paused(
        &mut self,
        lane: usize,
        letter: char,
        travel_position: f64,
        duration_beats: f64,
    ) -> Result<NoteId, EngineError> {
        self.insert(lane, letter, travel_position, duration_beats, NoteState::Paused)
    }

    fn insert(
        &mut self,
        lane: usize,
        letter: char,
        travel_position: f64,
        duration_beats: f64,
        state: NoteState,
    ) -> Result<NoteId, EngineError> {
        if lane >= self.lane_count {
            return Err(EngineError::LaneOutOfRange {
                lane,
                lane_count: self.lane_count,
            });
        }
        if !duration_beats.is_finite() || duration_beats < 0.0 {
            return Err(EngineError::InvalidDuration(duration_beats));
        }
        if !travel_position.is_finite() {
            return Err(EngineError::InvalidTravelPosition(travel_position));
        }

        let id = NoteId(self.next_id);
        self.next_id += 1;
        self.notes.push(Note {
            id,
            lane,
            letter,
            travel_position,
            duration_beats,
            state,
        });
        Ok(id)
    }

    /// Move notes toward the hit zone by `dt` scaled by the note speed and
    /// mark pending notes that passed the almost window as missed.
    ///
    /// Paused notes stay in place. Returns the ids that became missed.
    pub fn advance(
        &mut self,
        dt: f64,
        config: &ComplexityConfig,
        hit_zone_center: f64,
    ) -> Vec<NoteId> {
        let mut missed = Vec::new();
        if !(dt.is_finite() && dt > 0.0) {
            return missed;
        }

        let travel = dt * config.speed_multiplier;
        let miss_line = hit_zone_center - config.timing_windows.almost;

        for note in &mut self.notes {
            match note.state {
                NoteState::Pending => {
                    note.travel_position -= travel;
                    if note.travel_position < miss_line {
                        note.state = NoteState::Missed;
                        missed.push(note.id);
                    }
                }
                NoteState::BeingHeld => note.travel_position -= travel,
                _ => {}
            }
        }
        missed
    }

    /// Apply a state transition. Returns false (and leaves the note untouched)
    /// when the note is unknown or the transition is not allowed.
    pub fn mark(&mut self, id: NoteId, next: NoteState) -> bool {
        let Some(note) = self.get_mut(id) else {
            return false;
        };
        if !note.state.can_transition_to(next) {
            tracing::warn!("refused note transition {id}: {:?} -> {next:?}", note.state);
            return false;
        }
        if next == NoteState::BeingHeld && !note.is_hold() {
            tracing::warn!("refused hold on tap note {id}");
            return false;
        }
        note.state = next;
        true
    }

    /// Finish the held note in `lane`, if any. Not timing-gated.
    pub fn release_lane(&mut self, lane: usize) -> Option<NoteId> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.lane == lane && n.state == NoteState::BeingHeld)?;
        note.state = NoteState::Processed;
        Some(note.id)
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes
            .binary_search_by_key(&id, |n| n.id)
            .ok()
            .map(|idx| &self.notes[idx])
    }

    fn get_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        let idx = self.notes.binary_search_by_key(&id, |n| n.id).ok()?;
        Some(&mut self.notes[idx])
    }

    /// All stored notes, including terminal ones not yet pruned.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Notes still in play (not terminal).
    pub fn active(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|n| !n.state.is_terminal())
    }

    pub fn pending_in_lane(&self, lane: usize) -> impl Iterator<Item = &Note> {
        self.notes
            .iter()
            .filter(move |n| n.lane == lane && n.state == NoteState::Pending)
    }

    pub fn held_in_lane(&self, lane: usize) -> Option<&Note> {
        self.notes
            .iter()
            .find(|n| n.lane == lane && n.state == NoteState::BeingHeld)
    }

    /// Drop terminal notes. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.notes.len();
        self.notes.retain(|n| !n.state.is_terminal());
        before - self.notes.len()
    }

    /// Remove all notes. Ids keep increasing so they stay unique per run.
    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
