//! Video Interval Selector
//!
//! Desktop widget for picking a fixed-length interval out of a video by
//! dragging a window along its timeline, or scrubbing freely.

mod app;
mod components;
mod config;
mod constants;
mod core;
mod error;
mod hotkeys;
mod selector;
mod timeline;

use std::path::PathBuf;

use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::LaunchOptions;
use crate::config::{ConfigOverrides, SelectorConfig};
use crate::constants::{WINDOW_HEIGHT, WINDOW_WIDTH};
use crate::core::media::ensure_mp4;
use crate::core::media_server::{self, MEDIA_PROTOCOL};

/// Pick an interval out of a video.
#[derive(Parser, Debug)]
#[command(name = "video-interval-selector")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// MP4 file to open on launch
    video: Option<PathBuf>,

    /// JSON config file (`autoPlay`, `timeInterval`, `width`, ...)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Selection window length in seconds
    #[arg(long, short = 'i', conflicts_with = "free")]
    interval: Option<f64>,

    /// Free scrubbing, no fixed window
    #[arg(long)]
    free: bool,

    #[arg(long)]
    autoplay: bool,

    /// Show the raw video element above the canvas
    #[arg(long)]
    show_video: bool,

    /// Canvas width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    no_timer: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        let time_interval = if self.free {
            Some(None)
        } else {
            self.interval.map(Some)
        };
        ConfigOverrides {
            auto_play: self.autoplay.then_some(true),
            hide_video: self.show_video.then_some(false),
            muted: None,
            time_interval,
            width: self.width,
            height: self.height,
            show_timer: self.no_timer.then_some(false),
        }
    }

    /// Config file (or defaults) with command line flags on top.
    fn resolve_config(&self) -> error::Result<SelectorConfig> {
        let base = match &self.config {
            Some(path) => SelectorConfig::load(path)?,
            None => SelectorConfig::default(),
        };
        let config = base.merge(&self.overrides());
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();

    let log_filter = format!("video_interval_selector={}", cli.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            std::process::exit(2);
        }
    };
    if let Some(video) = &cli.video {
        if let Err(err) = ensure_mp4(video) {
            error!(path = %video.display(), %err, "cannot open video");
            std::process::exit(2);
        }
    }
    info!(?config, video = ?cli.video, "starting video interval selector");

    let window = Config::new()
        .with_window(
            WindowBuilder::new()
                .with_title("Video Interval Selector")
                .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
                .with_resizable(true),
        )
        .with_menu(None)
        .with_custom_protocol(MEDIA_PROTOCOL, |_webview_id, request| {
            media_server::serve(&request)
        });

    dioxus::LaunchBuilder::desktop()
        .with_cfg(window)
        .with_context(LaunchOptions {
            video: cli.video,
            config,
        })
        .launch(app::App);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("video-interval-selector").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_without_flags() {
        let cli = parse(&[]);
        assert_eq!(cli.resolve_config().unwrap(), SelectorConfig::default());
        assert!(cli.video.is_none());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = parse(&[
            "clip.mp4",
            "--interval",
            "40",
            "--autoplay",
            "--show-video",
            "--width",
            "640",
            "--no-timer",
        ]);
        let config = cli.resolve_config().unwrap();
        assert_eq!(cli.video, Some(PathBuf::from("clip.mp4")));
        assert_eq!(config.time_interval, Some(40.0));
        assert!(config.auto_play);
        assert!(!config.hide_video);
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 350);
        assert!(!config.show_timer);
    }

    #[test]
    fn test_free_clears_interval() {
        let config = parse(&["--free"]).resolve_config().unwrap();
        assert_eq!(config.time_interval, None);
    }

    #[test]
    fn test_free_conflicts_with_interval() {
        let result = Cli::try_parse_from(["video-interval-selector", "--free", "--interval", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_flags_layer_over_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "timeInterval": 12, "height": 200 }}"#).unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let config = parse(&["--config", &path, "--height", "300"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.time_interval, Some(12.0));
        assert_eq!(config.height, 300);
    }

    #[test]
    fn test_invalid_interval_is_rejected() {
        assert!(parse(&["--interval", "0"]).resolve_config().is_err());
    }
}
