//! Timeline module
//!
//! Track, seeker and the overlay controls drawn with the selector canvas.

mod playback_controls;
mod track;

pub(crate) use playback_controls::OverlayButton;
pub(crate) use track::SelectorTimeline;
