//! Root application component
//!
//! Demo shell around one interval selector: open an MP4, read back the
//! selected interval, and switch between a fixed window and free scrubbing.

use std::path::PathBuf;

use dioxus::prelude::*;
use tracing::{error, info};

use crate::components::{DataPanel, DesktopSelector, IntervalSelectorWidget, StatusBar, TitleBar};
use crate::config::SelectorConfig;
use crate::constants::*;
use crate::core::media::ensure_mp4;
use crate::core::media_server::media_url;
use crate::selector::{ErrorKind, SelectorEvent};

pub const VIDEO_TOO_SHORT_MESSAGE: &str = "Your video is too short regarding your time interval.";

const SELECTOR_CONTAINER_ID: &str = "video-interval-selector";

/// Resolved command line, provided as root context.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchOptions {
    pub video: Option<PathBuf>,
    pub config: SelectorConfig,
}

/// Interval for the next selector given the launch interval and the switch.
pub fn interval_for(launch_interval: Option<f64>, free_scrub: bool) -> Option<f64> {
    if free_scrub {
        None
    } else {
        Some(launch_interval.unwrap_or(FALLBACK_TIME_INTERVAL_SECONDS))
    }
}

/// Message shown in the banner for a selector error.
pub fn error_message_for(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::VideoTooShort => VIDEO_TOO_SHORT_MESSAGE,
    }
}

#[component]
pub fn App() -> Element {
    let launch = use_context::<LaunchOptions>();

    let mut video_path = use_signal(|| launch.video.clone());
    let mut free_scrub = use_signal(|| !launch.config.is_constrained());
    let mut generation = use_signal(|| 0_u64);
    let mut error_message = use_signal(|| None::<String>);
    let mut data_json = use_signal(|| None::<String>);
    let mut initialized = use_signal(|| false);
    let mut selector = use_signal(|| None::<DesktopSelector>);

    // Tear the current selector down and mount a fresh one.
    let mut remount = move || {
        if let Some(instance) = selector.write().as_mut() {
            instance.destroy();
        }
        selector.set(None);
        initialized.set(false);
        error_message.set(None);
        data_json.set(None);
        let next = generation() + 1;
        generation.set(next);
    };

    let on_selector_event = move |event: SelectorEvent| match event {
        SelectorEvent::Initialized => initialized.set(true),
        SelectorEvent::Error { kind } => {
            error_message.set(Some(error_message_for(kind).to_string()));
        }
        SelectorEvent::VideoTooShort => info!("selector removed, video shorter than interval"),
    };

    let widget_config = SelectorConfig {
        time_interval: interval_for(launch.config.time_interval, free_scrub()),
        ..launch.config.clone()
    };
    let time_interval = widget_config.time_interval;

    let current_path = video_path();
    let video_name = current_path
        .as_ref()
        .and_then(|path| path.file_name())
        .map(|name| name.to_string_lossy().into_owned());
    let source = current_path.as_ref().map(|path| media_url(path));

    let status = if error_message().is_some() {
        "Error"
    } else if initialized() {
        "Ready"
    } else if source.is_some() {
        "Loading"
    } else {
        "No video"
    };

    rsx! {
        style {
            r#"
            *, *::before, *::after {{ box-sizing: border-box; }}
            html, body {{ margin: 0; padding: 0; overflow: hidden; background-color: {BG_BASE}; }}
            body {{ -webkit-font-smoothing: antialiased; }}
            ::-webkit-scrollbar {{ width: 6px; height: 6px; }}
            ::-webkit-scrollbar-track {{ background: transparent; }}
            ::-webkit-scrollbar-thumb {{ background: {BORDER_DEFAULT}; border-radius: 3px; }}
            ::-webkit-scrollbar-thumb:hover {{ background: {BORDER_STRONG}; }}
            .collapse-btn {{ opacity: 0.6; transition: opacity 0.15s ease, background-color 0.15s ease; }}
            .collapse-btn:hover {{ opacity: 1; background-color: {BG_HOVER} !important; }}
            "#
        }

        div {
            class: "app-container",
            style: "
                display: flex; flex-direction: column;
                width: 100vw; height: 100vh;
                background-color: {BG_BASE}; color: {TEXT_PRIMARY};
                font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
                overflow: hidden; position: fixed; top: 0; left: 0;
            ",

            TitleBar {
                video_name: video_name,
                free_scrub: free_scrub(),
                on_open_video: move |_| {
                    let Some(path) = rfd::FileDialog::new()
                        .add_filter("MP4 Video", &["mp4"])
                        .set_title("Open Video")
                        .pick_file()
                    else {
                        return;
                    };
                    match ensure_mp4(&path) {
                        Ok(()) => {
                            remount();
                            info!(path = %path.display(), "opening video");
                            video_path.set(Some(path));
                        }
                        Err(err) => {
                            error!(path = %path.display(), %err, "rejected video file");
                            error_message.set(Some(err.to_string()));
                        }
                    }
                },
                on_get_data: move |_| {
                    let data = selector.read().as_ref().map(|instance| instance.get_data());
                    let Some(data) = data else {
                        data_json.set(None);
                        return;
                    };
                    match serde_json::to_string_pretty(&data) {
                        Ok(json) => data_json.set(Some(json)),
                        Err(err) => error!(%err, "could not serialize interval data"),
                    }
                },
                on_toggle_free_scrub: move |_| {
                    let next = !free_scrub();
                    remount();
                    free_scrub.set(next);
                },
            }

            div {
                style: "
                    flex: 1; display: flex; flex-direction: column; align-items: center;
                    gap: 16px; padding: 24px; overflow: auto;
                    background-color: {BG_DEEPEST};
                ",
                if let Some(source) = source {
                    IntervalSelectorWidget {
                        key: "{generation}",
                        container: SELECTOR_CONTAINER_ID.to_string(),
                        source: source,
                        config: widget_config,
                        selector: selector,
                        on_event: on_selector_event,
                    }
                } else {
                    div {
                        style: "margin-top: 80px; font-size: 13px; color: {TEXT_MUTED};",
                        "Open an MP4 video to begin"
                    }
                }
                DataPanel {
                    data_json: data_json(),
                    error_message: error_message(),
                }
            }

            StatusBar {
                status: status.to_string(),
                time_interval: time_interval,
            }
        }
    }
}
