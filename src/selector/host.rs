//! Seams between the selector and the environment that renders it.

use super::listeners::ListenerHost;

/// The `<video>` element plus the canvas frames are drawn into.
pub trait MediaElement {
    /// Total length in seconds; NaN until metadata is loaded.
    fn duration(&self) -> f64;
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn is_ended(&self) -> bool;
    /// Paint the current video frame onto the canvas at the given size.
    fn draw_frame(&mut self, width: u32, height: u32);
}

/// Everything a selector needs from its host.
pub trait SelectorHost: MediaElement + ListenerHost {}

impl<T: MediaElement + ListenerHost> SelectorHost for T {}
