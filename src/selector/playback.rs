//! Playback loop state machine.
//!
//! The loop never schedules itself. The host calls `IntervalSelector::tick`
//! once per display frame (or time update) and requests another frame only
//! while the returned decision is [`TickDecision::Continue`].

use super::seeker::TimeWindow;

/// Playback state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    /// Loaded (or loading) but never played.
    #[default]
    Idle,
    Playing,
    Paused,
    /// Stopped at a boundary or explicitly; position was reset.
    Stopped,
}

/// What the host should do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    /// Keep requesting frames.
    Continue,
    /// Stop requesting frames; nothing else to do.
    Halt,
    /// The interval boundary was crossed; playback must stop and rewind.
    StopAtBoundary,
}

/// Media element state observed at a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub current_time: f64,
    pub paused: bool,
    pub ended: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackLoop {
    state: LoopState,
}

impl PlaybackLoop {
    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == LoopState::Playing
    }

    /// Idle/Paused/Stopped -> Playing. Returns false if already playing.
    pub fn play(&mut self) -> bool {
        if self.state == LoopState::Playing {
            return false;
        }
        self.state = LoopState::Playing;
        true
    }

    /// Playing -> Paused. Any other state is left untouched.
    pub fn pause(&mut self) -> bool {
        if self.state != LoopState::Playing {
            return false;
        }
        self.state = LoopState::Paused;
        true
    }

    pub fn stop(&mut self) {
        self.state = LoopState::Stopped;
    }

    pub fn reset(&mut self) {
        self.state = LoopState::Idle;
    }

    /// Decide whether the loop keeps running after a frame has been drawn.
    pub fn evaluate(&self, frame: FrameSnapshot, window: Option<TimeWindow>) -> TickDecision {
        if self.state != LoopState::Playing {
            return TickDecision::Halt;
        }
        // A window ending at the video's end is exhausted once the media ends,
        // even if rounding left its end a hair past the duration.
        if let Some(window) = window {
            if frame.ended || window.is_exhausted_at(frame.current_time) {
                return TickDecision::StopAtBoundary;
            }
        }
        if frame.paused || frame.ended {
            return TickDecision::Halt;
        }
        TickDecision::Continue
    }
}

/// Format seconds as `MM:SS`; minutes are not wrapped at the hour.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Timer text shown under the canvas.
pub fn format_timer(current_time: f64, duration: f64) -> String {
    format!(
        "{} / {}",
        format_timestamp(current_time),
        format_timestamp(duration)
    )
}
