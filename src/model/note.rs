use serde::{Deserialize, Serialize};

/// Identity of a note within one run. Assigned sequentially by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub u64);

impl std::fmt::Display for NoteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteState {
    /// Travelling toward the hit zone, waiting to be matched.
    Pending,
    /// Held in place until the matching lane is pressed (guided input).
    Paused,
    /// Hold note whose head was hit; waiting for the key release.
    BeingHeld,
    Hit,
    Missed,
    Processed,
}

impl NoteState {
    /// Terminal states never take part in matching again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Hit | Self::Missed | Self::Processed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: NoteState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Hit)
                | (Self::Pending, Self::BeingHeld)
                | (Self::Pending, Self::Missed)
                | (Self::BeingHeld, Self::Processed)
                | (Self::Paused, Self::Hit)
        )
    }
}

/// A spawned note travelling down one lane.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: NoteId,
    pub lane: usize,
    /// Key symbol bound to the lane at spawn time.
    pub letter: char,
    /// Distance-to-hit-zone proxy. Decreases every tick.
    pub travel_position: f64,
    /// 0 for tap notes, > 0 for hold notes.
    pub duration_beats: f64,
    pub state: NoteState,
}

impl Note {
    pub fn is_hold(&self) -> bool {
        self.duration_beats > 0.0
    }

    /// Half of the note's extent along the lane.
    /// Hold notes grow with their duration.
    pub fn half_height(&self, geometry: &NoteGeometry) -> f64 {
        (geometry.tap_height + self.duration_beats * geometry.beat_length) / 2.0
    }

    /// Signed offset from the hit zone. Positive means the note has not arrived yet.
    pub fn offset_from(&self, hit_zone_center: f64) -> f64 {
        self.travel_position - hit_zone_center
    }
}

/// Extent of notes along the lane, in travel units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteGeometry {
    /// Extent of a tap note.
    pub tap_height: f64,
    /// Travel length of one beat, used to size hold notes.
    pub beat_length: f64,
}

impl Default for NoteGeometry {
    fn default() -> Self {
        Self {
            tap_height: 0.1,
            beat_length: 0.5,
        }
    }
}
