//! Selector configuration.
//!
//! Keys mirror the widget's option names (`autoPlay`, `timeInterval`, ...).
//! Missing keys keep their defaults; `"timeInterval": null` switches the
//! widget to free scrubbing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SelectorError};

/// Widget options, fixed once a selector is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Start playing as soon as the video is ready
    pub auto_play: bool,
    /// Hide the raw `<video>` element; only the canvas is shown
    pub hide_video: bool,
    pub muted: bool,
    /// Length of the selectable window in seconds, `None` for free scrubbing
    pub time_interval: Option<f64>,
    /// Canvas (and timeline track) width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    pub show_timer: bool,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            auto_play: false,
            hide_video: true,
            muted: true,
            time_interval: Some(5.0),
            width: 720,
            height: 350,
            show_timer: true,
        }
    }
}

/// Partial configuration layered on top of a [`SelectorConfig`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub auto_play: Option<bool>,
    pub hide_video: Option<bool>,
    pub muted: Option<bool>,
    /// `Some(None)` clears the interval.
    pub time_interval: Option<Option<f64>>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub show_timer: Option<bool>,
}

impl SelectorConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let config: SelectorConfig = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply explicit values field by field.
    pub fn merge(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(auto_play) = overrides.auto_play {
            self.auto_play = auto_play;
        }
        if let Some(hide_video) = overrides.hide_video {
            self.hide_video = hide_video;
        }
        if let Some(muted) = overrides.muted {
            self.muted = muted;
        }
        if let Some(time_interval) = overrides.time_interval {
            self.time_interval = time_interval;
        }
        if let Some(width) = overrides.width {
            self.width = width;
        }
        if let Some(height) = overrides.height {
            self.height = height;
        }
        if let Some(show_timer) = overrides.show_timer {
            self.show_timer = show_timer;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(interval) = self.time_interval {
            if !(interval.is_finite() && interval > 0.0) {
                return Err(SelectorError::InvalidInterval { interval });
            }
        }
        if self.width == 0 || self.height == 0 {
            return Err(SelectorError::Config(format!(
                "canvas size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn is_constrained(&self) -> bool {
        self.time_interval.is_some()
    }
}
