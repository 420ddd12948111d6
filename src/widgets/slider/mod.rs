//! Video slider - timeline with marks, track lanes, selection and zoom
//!
//! The model (`VideoSlider`) is renderer-agnostic; `video_slider` paints it
//! with egui.

pub mod header;
pub mod layout;
pub mod mark;
pub mod selection;
mod slider;
mod slider_input;
mod slider_ui;
pub mod ticks;
pub mod tracks;
pub mod visuals;

pub use layout::TrackLayout;
pub use mark::{Mark, MarkId, MarkKind, Rgb};
pub use slider::{DragMode, DragState, SliderConfig, VideoSlider};
pub use slider_ui::video_slider;
pub use tracks::{
    HashPalette, SuggestedFrame, SuggestionKind, TrackMarks, TrackOccupancy, TrackPalette,
    track_marks,
};
pub use visuals::{MarkBackend, MarkVisual, MarkVisuals, SceneRect};
