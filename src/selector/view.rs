//! Render model consumed by the widget component.

use crate::config::SelectorConfig;

/// Seeker geometry and fill as drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeekerView {
    pub left_px: f64,
    pub width_px: f64,
    /// 0..=100
    pub fill_pct: f64,
}

/// What the widget currently shows. Absent once the selector is torn down.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetView {
    pub play_button: bool,
    pub pause_button: bool,
    /// 0..=100
    pub timeline_fill_pct: f64,
    pub seeker: Option<SeekerView>,
    pub timer: Option<String>,
}

impl WidgetView {
    pub(crate) fn initial(config: &SelectorConfig) -> Self {
        Self {
            play_button: false,
            pause_button: false,
            timeline_fill_pct: 0.0,
            seeker: config.time_interval.map(|_| SeekerView {
                left_px: 0.0,
                width_px: 0.0,
                fill_pct: 0.0,
            }),
            timer: config.show_timer.then(String::new),
        }
    }

    pub(crate) fn show_play(&mut self) {
        self.play_button = true;
        self.pause_button = false;
    }

    pub(crate) fn show_pause(&mut self) {
        self.play_button = false;
        self.pause_button = true;
    }

    pub(crate) fn hide_buttons(&mut self) {
        self.play_button = false;
        self.pause_button = false;
    }
}
