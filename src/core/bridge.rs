//! Rust side of the webview bridge.
//!
//! The selector drives the `<video>`/`<canvas>` pair and the document
//! listeners through [`BridgeHost`], which forwards [`BridgeCommand`]s to
//! `SELECTOR_BRIDGE_SCRIPT` and caches the last media state reported back.

use dioxus::prelude::document;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::selector::{ListenerHost, ListenerKind, MediaElement};

/// Commands understood by the bridge script.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BridgeCommand {
    Bind {
        video_id: String,
        canvas_id: String,
        seeker_id: Option<String>,
        muted: bool,
    },
    Play,
    Pause,
    Seek { time: f64 },
    Draw { width: u32, height: u32 },
    RequestFrame,
    Attach {
        listener: ListenerKind,
        events: &'static [&'static str],
    },
    Detach { listener: ListenerKind },
    Teardown,
}

/// Media element state as reported by the webview.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct MediaSnapshot {
    pub current_time: f64,
    /// `None` until metadata is loaded.
    pub duration: Option<f64>,
    pub paused: bool,
    pub ended: bool,
}

/// Messages sent by the bridge script.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BridgeEvent {
    Loaded(MediaSnapshot),
    CanPlay(MediaSnapshot),
    TimeUpdate(MediaSnapshot),
    Frame(MediaSnapshot),
    DragStart { client_x: f64 },
    DragMove { client_x: f64 },
    DragEnd,
    KeyDown { key: String, editable: bool },
}

impl BridgeEvent {
    pub fn media(&self) -> Option<MediaSnapshot> {
        match self {
            BridgeEvent::Loaded(media)
            | BridgeEvent::CanPlay(media)
            | BridgeEvent::TimeUpdate(media)
            | BridgeEvent::Frame(media) => Some(*media),
            _ => None,
        }
    }
}

/// Element id for one part of a selector instance.
pub fn element_id(scope: Uuid, part: &str) -> String {
    format!("vis-{scope}-{part}")
}

/// [`MediaElement`] + [`ListenerHost`] backed by a running bridge script.
pub struct BridgeHost {
    eval: document::Eval,
    media: MediaSnapshot,
}

impl BridgeHost {
    pub fn new(eval: document::Eval) -> Self {
        Self {
            eval,
            media: MediaSnapshot {
                paused: true,
                ..Default::default()
            },
        }
    }

    pub fn send(&self, command: BridgeCommand) {
        if let Err(err) = self.eval.send(command) {
            warn!(?err, "selector bridge command dropped");
        }
    }

    /// Adopt the state reported by the webview.
    pub fn sync(&mut self, media: MediaSnapshot) {
        self.media = media;
    }
}

impl MediaElement for BridgeHost {
    fn duration(&self) -> f64 {
        self.media.duration.unwrap_or(f64::NAN)
    }

    fn current_time(&self) -> f64 {
        self.media.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.media.current_time = seconds;
        self.media.ended = false;
        self.send(BridgeCommand::Seek { time: seconds });
    }

    fn play(&mut self) {
        self.media.paused = false;
        self.media.ended = false;
        self.send(BridgeCommand::Play);
    }

    fn pause(&mut self) {
        self.media.paused = true;
        self.send(BridgeCommand::Pause);
    }

    fn is_paused(&self) -> bool {
        self.media.paused
    }

    fn is_ended(&self) -> bool {
        self.media.ended
    }

    fn draw_frame(&mut self, width: u32, height: u32) {
        self.send(BridgeCommand::Draw { width, height });
    }
}

impl ListenerHost for BridgeHost {
    fn attach_listener(&mut self, kind: ListenerKind) {
        self.send(BridgeCommand::Attach {
            listener: kind,
            events: kind.dom_events(),
        });
    }

    fn detach_listener(&mut self, kind: ListenerKind) {
        self.send(BridgeCommand::Detach { listener: kind });
    }
}
