//! Interval selector controller
//!
//! Owns the coordinate model, the playback loop, the drag session and the
//! observer/listener registries. It talks to the rendered widget only through
//! a [`SelectorHost`], so everything here runs without a webview.
//!
//! # Lifecycle
//!
//! - `new()` validates arguments and config; the widget tree exists but
//!   nothing is interactive yet.
//! - `on_loaded()` is called once the host knows the video duration. It
//!   either initializes the widget or, if the interval does not fit, emits
//!   `Error`/`VideoTooShort` and tears everything down.
//! - `tick()` is called by the host on time updates and display frames.
//! - `destroy()` releases every listener and the widget tree.

mod drag;
mod events;
mod geometry;
mod host;
mod listeners;
mod playback;
mod seeker;
mod view;

#[cfg(test)]
mod tests;

pub use drag::DragSession;
pub use events::{ErrorKind, EventKind, EventRegistry, SelectorEvent};
pub use geometry::{fill_percentage, offset_to_time, time_to_offset};
pub use host::{MediaElement, SelectorHost};
pub use listeners::{ListenerHost, ListenerKind, ListenerRegistry};
pub use playback::{format_timer, format_timestamp, FrameSnapshot, LoopState, PlaybackLoop, TickDecision};
pub use seeker::{SeekerWindow, StepDirection, TimeWindow, Track, KEYBOARD_STEP_PX};
pub use view::{SeekerView, WidgetView};

use dioxus::prelude::Key;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SelectorConfig;
use crate::error::{Result, SelectorError};
use crate::hotkeys::{handle_hotkey, HotkeyAction, HotkeyContext, HotkeyResult};

/// Where a seek should land.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekTarget {
    /// Pixels from the track's left edge.
    Offset(f64),
    /// Pointer position in page coordinates and the track's page offset.
    Pointer { page_x: f64, track_page_left: f64 },
}

impl SeekTarget {
    fn offset(self) -> f64 {
        match self {
            SeekTarget::Offset(offset) => offset,
            SeekTarget::Pointer {
                page_x,
                track_page_left,
            } => page_x - track_page_left,
        }
    }
}

/// The selected interval, as handed to the embedding application.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalData {
    pub start_time: f64,
    pub end_time: f64,
    /// `None` in free-scrub mode.
    pub time_interval: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Loading,
    Ready,
    Destroyed,
}

pub struct IntervalSelector<H: SelectorHost> {
    scope: Uuid,
    config: SelectorConfig,
    host: H,
    track: Track,
    seeker: Option<SeekerWindow>,
    playback: PlaybackLoop,
    drag: Option<DragSession>,
    events: EventRegistry,
    listeners: ListenerRegistry,
    view: Option<WidgetView>,
    lifecycle: Lifecycle,
}

impl<H: SelectorHost> IntervalSelector<H> {
    pub fn new(
        container: impl Into<String>,
        source: impl Into<String>,
        config: SelectorConfig,
        host: H,
    ) -> Result<Self> {
        let container = container.into();
        let source = source.into();
        if container.trim().is_empty() {
            return Err(SelectorError::MissingContainer);
        }
        if source.trim().is_empty() {
            return Err(SelectorError::MissingSource);
        }
        config.validate()?;

        let scope = Uuid::new_v4();
        info!(%scope, %container, %source, constrained = config.is_constrained(), "creating interval selector");
        Ok(Self {
            scope,
            track: Track::new(0.0, f64::from(config.width)),
            view: Some(WidgetView::initial(&config)),
            config,
            host,
            seeker: None,
            playback: PlaybackLoop::default(),
            drag: None,
            events: EventRegistry::default(),
            listeners: ListenerRegistry::default(),
            lifecycle: Lifecycle::Loading,
        })
    }

    /// Unique per-instance prefix for element ids.
    pub fn scope(&self) -> Uuid {
        self.scope
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn track(&self) -> Track {
        self.track
    }

    pub fn seeker(&self) -> Option<SeekerWindow> {
        self.seeker
    }

    pub fn state(&self) -> LoopState {
        self.playback.state()
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Render model, `None` once destroyed.
    pub fn view(&self) -> Option<&WidgetView> {
        self.view.as_ref()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle == Lifecycle::Ready
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&SelectorEvent) + 'static) {
        self.events.on(kind, callback);
    }

    /// Window selected by the seeker, if constrained and loaded.
    pub fn window(&self) -> Option<TimeWindow> {
        let interval = self.config.time_interval?;
        let seeker = self.seeker?;
        seeker
            .window(self.track, interval, self.host.duration())
            .ok()
    }

    /// Video metadata is available: validate against the interval and go live.
    pub fn on_loaded(&mut self) -> Result<()> {
        if self.lifecycle != Lifecycle::Loading {
            return Ok(());
        }
        let duration = self.host.duration();

        if let Some(interval) = self.config.time_interval {
            if interval > duration {
                warn!(interval, duration, "video is shorter than the selection interval");
                self.events.emit(&SelectorEvent::Error {
                    kind: ErrorKind::VideoTooShort,
                });
                self.events.emit(&SelectorEvent::VideoTooShort);
                self.destroy();
                return Err(SelectorError::VideoTooShort { interval, duration });
            }
        }
        if !(duration.is_finite() && duration > 0.0) {
            return Err(SelectorError::InvalidDuration { duration });
        }
        if let Some(interval) = self.config.time_interval {
            self.seeker = Some(SeekerWindow::new(self.track, interval, duration)?);
            self.sync_seeker_view();
        }

        self.lifecycle = Lifecycle::Ready;
        info!(scope = %self.scope, duration, "interval selector initialized");
        self.events.emit(&SelectorEvent::Initialized);
        if let Some(view) = self.view.as_mut() {
            view.show_play();
        }
        self.listeners.attach(&mut self.host, ListenerKind::KeyDown);

        if self.config.auto_play {
            self.play();
        }
        Ok(())
    }

    /// First frame is decodable; paint it.
    pub fn on_can_play(&mut self) -> TickDecision {
        self.tick()
    }

    pub fn play(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.playback.play();
        if let Some(view) = self.view.as_mut() {
            view.hide_buttons();
        }
        self.host.play();
    }

    pub fn pause(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.playback.pause();
        if let Some(view) = self.view.as_mut() {
            view.show_pause();
        }
        self.host.pause();
    }

    /// Stop and rewind to the window start (or the beginning in free-scrub mode).
    pub fn stop(&mut self) {
        if !self.is_ready() {
            return;
        }
        self.playback.stop();
        if let Some(view) = self.view.as_mut() {
            view.show_play();
        }
        self.host.pause();
        let reset = self.window().map(|window| window.start).unwrap_or(0.0);
        self.host.set_current_time(reset);
    }

    pub fn play_pause(&mut self) {
        if self.playback.is_playing() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move the playhead. With a seeker the target is ignored and the seek
    /// lands on the seeker's left edge. Returns the new time, or `None`
    /// before the video is loaded.
    pub fn seek_to(&mut self, target: SeekTarget) -> Result<Option<f64>> {
        if !self.is_ready() {
            return Ok(None);
        }
        let offset = match self.seeker {
            Some(seeker) => seeker.offset_in_track(self.track),
            None => target.offset(),
        };
        let time = offset_to_time(offset, self.track.width_px, self.host.duration())?;
        debug!(offset, time, "seeking");
        self.host.set_current_time(time);
        Ok(Some(time))
    }

    pub fn drag_start(&mut self, pointer_x: f64) {
        if !self.is_ready() {
            return;
        }
        let Some(seeker) = self.seeker else {
            return;
        };
        self.drag = Some(DragSession::begin(pointer_x, seeker.left_px));
        self.listeners.attach(&mut self.host, ListenerKind::DragMove);
        self.listeners.attach(&mut self.host, ListenerKind::DragEnd);
    }

    /// Follow the pointer. Returns the committed seeker left edge.
    pub fn drag_move(&mut self, pointer_x: f64) -> Result<Option<f64>> {
        let Some(session) = self.drag else {
            return Ok(None);
        };
        let Some(seeker) = self.seeker.as_mut() else {
            return Ok(None);
        };
        let left = seeker.move_to(self.track, session.proposed_left(pointer_x));
        self.sync_seeker_view();
        self.seek_to(SeekTarget::Offset(left))?;
        Ok(Some(left))
    }

    pub fn drag_end(&mut self) {
        self.drag = None;
        self.listeners.detach(&mut self.host, ListenerKind::DragMove);
        self.listeners.detach(&mut self.host, ListenerKind::DragEnd);
    }

    /// Nudge the seeker by one keyboard step and seek to it.
    pub fn step_seeker(&mut self, direction: StepDirection) -> Result<Option<f64>> {
        if !self.is_ready() {
            return Ok(None);
        }
        let Some(seeker) = self.seeker.as_mut() else {
            return Ok(None);
        };
        let Some(left) = seeker.step(self.track, direction) else {
            return Ok(None);
        };
        self.sync_seeker_view();
        self.seek_to(SeekTarget::Offset(left))?;
        Ok(Some(left))
    }

    /// Document keydown. Returns true when the key was handled.
    pub fn key_down(&mut self, key: &Key, input_focused: bool) -> Result<bool> {
        if !self.is_ready() {
            return Ok(false);
        }
        let context = HotkeyContext {
            seeker_active: self.seeker.is_some(),
            input_focused,
        };
        match handle_hotkey(key, &context) {
            HotkeyResult::Action(action) => {
                self.apply_hotkey(action)?;
                Ok(true)
            }
            HotkeyResult::NoMatch | HotkeyResult::Suppressed => Ok(false),
        }
    }

    pub fn apply_hotkey(&mut self, action: HotkeyAction) -> Result<()> {
        match action {
            HotkeyAction::PlayPause => self.play_pause(),
            HotkeyAction::StepSeekerBack => {
                self.step_seeker(StepDirection::Back)?;
            }
            HotkeyAction::StepSeekerForward => {
                self.step_seeker(StepDirection::Forward)?;
            }
        }
        Ok(())
    }

    /// One pass of the render/update loop.
    pub fn tick(&mut self) -> TickDecision {
        if !self.is_ready() {
            return TickDecision::Halt;
        }
        let duration = self.host.duration();
        let frame = FrameSnapshot {
            current_time: self.host.current_time(),
            paused: self.host.is_paused(),
            ended: self.host.is_ended(),
        };
        let window = self.window();

        self.host.draw_frame(self.config.width, self.config.height);
        if let Some(view) = self.view.as_mut() {
            view.timeline_fill_pct = fill_percentage(frame.current_time, duration);
            if let (Some(seeker_view), Some(window)) = (view.seeker.as_mut(), window) {
                seeker_view.fill_pct = window
                    .progress_percentage(frame.current_time)
                    .clamp(0.0, 100.0);
            }
            if let Some(timer) = view.timer.as_mut() {
                *timer = format_timer(frame.current_time, duration);
            }
        }

        let decision = self.playback.evaluate(frame, window);
        match decision {
            TickDecision::StopAtBoundary => {
                debug!(time = frame.current_time, "window end reached");
                self.stop();
            }
            TickDecision::Halt if frame.ended && self.playback.is_playing() => {
                self.playback.stop();
                if let Some(view) = self.view.as_mut() {
                    view.show_play();
                }
            }
            _ => {}
        }
        decision
    }

    pub fn get_data(&self) -> IntervalData {
        match (self.config.time_interval, self.window()) {
            (Some(interval), Some(window)) => IntervalData {
                start_time: window.start,
                end_time: window.end,
                time_interval: Some(interval),
            },
            (Some(interval), None) => IntervalData {
                start_time: 0.0,
                end_time: interval,
                time_interval: Some(interval),
            },
            (None, _) => {
                let time = self.host.current_time();
                let time = if time.is_finite() { time } else { 0.0 };
                IntervalData {
                    start_time: time,
                    end_time: time,
                    time_interval: None,
                }
            }
        }
    }

    /// Release listeners and the widget tree. Safe to call repeatedly.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.listeners.detach_all(&mut self.host);
        self.drag = None;
        self.seeker = None;
        self.view = None;
        self.playback.reset();
        self.events.clear();
        self.lifecycle = Lifecycle::Destroyed;
        info!(scope = %self.scope, "interval selector destroyed");
    }

    fn sync_seeker_view(&mut self) {
        let Some(seeker) = self.seeker else {
            return;
        };
        if let Some(seeker_view) = self.view.as_mut().and_then(|view| view.seeker.as_mut()) {
            seeker_view.left_px = seeker.left_px;
            seeker_view.width_px = seeker.width_px;
        }
    }
}
