//! Pixel/time mapping for a fixed-width timeline track.

use crate::error::{Result, SelectorError};

fn ensure_track_width(track_width_px: f64) -> Result<()> {
    if track_width_px.is_finite() && track_width_px > 0.0 {
        Ok(())
    } else {
        Err(SelectorError::ZeroWidthTrack {
            width: track_width_px,
        })
    }
}

/// Convert a pixel offset on the track into seconds.
///
/// The offset is not clamped; callers keep it inside the track.
pub fn offset_to_time(offset_px: f64, track_width_px: f64, duration: f64) -> Result<f64> {
    ensure_track_width(track_width_px)?;
    Ok(duration * (offset_px / track_width_px))
}

/// Convert seconds back into a pixel offset on the track.
pub fn time_to_offset(time_seconds: f64, track_width_px: f64, duration: f64) -> Result<f64> {
    ensure_track_width(track_width_px)?;
    if !(duration.is_finite() && duration > 0.0) {
        return Err(SelectorError::InvalidDuration { duration });
    }
    Ok(track_width_px * (time_seconds / duration))
}

/// Share of `total` covered by `value`, as a 0..=100 percentage.
pub fn fill_percentage(value: f64, total: f64) -> f64 {
    if !(total.is_finite() && total > 0.0) || !value.is_finite() {
        return 0.0;
    }
    (value * 100.0 / total).clamp(0.0, 100.0)
}
