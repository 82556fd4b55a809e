// Note and lane data models.

pub mod lane;
pub mod note;

pub use lane::LaneLayout;
pub use note::{Note, NoteGeometry, NoteId, NoteState};
