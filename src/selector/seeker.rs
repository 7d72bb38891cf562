//! Draggable seeker window over the timeline track.
//!
//! Only exists when a fixed interval length is configured. The seeker's left
//! edge is kept inside `[track.left_px, track.left_px + track.width_px - width_px]`
//! so the selected window never runs past the end of the video.

use super::geometry::offset_to_time;
use crate::error::{Result, SelectorError};

/// Pixels moved by one arrow key press.
pub const KEYBOARD_STEP_PX: f64 = 1.0;

/// Horizontal extent of the timeline track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    /// Inner left edge of the track (border inset).
    pub left_px: f64,
    /// Usable width of the track.
    pub width_px: f64,
}

impl Track {
    pub fn new(left_px: f64, width_px: f64) -> Self {
        Self { left_px, width_px }
    }
}

/// Direction of a keyboard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Back,
    Forward,
}

impl StepDirection {
    fn sign(self) -> f64 {
        match self {
            StepDirection::Back => -1.0,
            StepDirection::Forward => 1.0,
        }
    }
}

/// Span of time selected by the seeker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Whether playback at `time` has reached the end of the window.
    pub fn is_exhausted_at(&self, time: f64) -> bool {
        time >= self.end
    }

    /// Progress through the window as a raw percentage (may leave 0..=100
    /// when the playhead sits outside the window).
    pub fn progress_percentage(&self, time: f64) -> f64 {
        let length = self.length();
        if length <= 0.0 {
            return 0.0;
        }
        (time - self.start) * 100.0 / length
    }
}

/// Seeker geometry in track pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekerWindow {
    pub left_px: f64,
    pub width_px: f64,
}

impl SeekerWindow {
    /// Seeker sized for `time_interval` seconds of a `duration` long video,
    /// parked at the start of the track.
    pub fn new(track: Track, time_interval: f64, duration: f64) -> Result<Self> {
        let width_px = Self::width_for(track.width_px, time_interval, duration)?;
        Ok(Self {
            left_px: track.left_px,
            width_px,
        })
    }

    pub fn width_for(track_width_px: f64, time_interval: f64, duration: f64) -> Result<f64> {
        if !(track_width_px.is_finite() && track_width_px > 0.0) {
            return Err(SelectorError::ZeroWidthTrack {
                width: track_width_px,
            });
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SelectorError::InvalidDuration { duration });
        }
        Ok(track_width_px * (time_interval / duration))
    }

    pub fn min_left(track: Track) -> f64 {
        track.left_px
    }

    pub fn max_left(&self, track: Track) -> f64 {
        (track.left_px + track.width_px - self.width_px).max(track.left_px)
    }

    pub fn clamp_left(&self, track: Track, proposed_px: f64) -> f64 {
        proposed_px.clamp(Self::min_left(track), self.max_left(track))
    }

    /// Commit a new left edge after clamping; returns the committed value.
    pub fn move_to(&mut self, track: Track, proposed_px: f64) -> f64 {
        self.left_px = self.clamp_left(track, proposed_px);
        self.left_px
    }

    /// Move by one keyboard step. Returns the new left edge, or `None` when
    /// the seeker is already against the bound in that direction.
    pub fn step(&mut self, track: Track, direction: StepDirection) -> Option<f64> {
        let proposed = self.left_px + direction.sign() * KEYBOARD_STEP_PX;
        let next = self.clamp_left(track, proposed);
        if (next - self.left_px).abs() < f64::EPSILON {
            return None;
        }
        self.left_px = next;
        Some(next)
    }

    /// Offset of the seeker's left edge from the track origin.
    pub fn offset_in_track(&self, track: Track) -> f64 {
        self.left_px - track.left_px
    }

    /// Time window currently covered by the seeker.
    pub fn window(&self, track: Track, time_interval: f64, duration: f64) -> Result<TimeWindow> {
        let start = offset_to_time(self.offset_in_track(track), track.width_px, duration)?;
        Ok(TimeWindow {
            start,
            end: start + time_interval,
        })
    }
}
