//! Desktop rendering of an [`IntervalSelector`].
//!
//! The component owns the bridge script for one selector instance. Media and
//! document events come back through `eval.recv()` and are dispatched to the
//! controller; the controller's render model drives what is drawn here.

use std::time::Duration;

use dioxus::prelude::*;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::config::SelectorConfig;
use crate::constants::*;
use crate::core::bridge::{element_id, BridgeCommand, BridgeEvent, BridgeHost};
use crate::error::SelectorError;
use crate::hotkeys::key_from_dom;
use crate::selector::{EventKind, IntervalSelector, SeekTarget, SelectorEvent, TickDecision};
use crate::timeline::{OverlayButton, SelectorTimeline};

pub type DesktopSelector = IntervalSelector<BridgeHost>;

#[component]
pub fn IntervalSelectorWidget(
    /// Id of the element the widget renders into.
    container: String,
    /// URL the `<video>` element loads.
    source: String,
    config: SelectorConfig,
    /// Slot owned by the parent so it can query and destroy the instance.
    mut selector: Signal<Option<DesktopSelector>>,
    on_event: EventHandler<SelectorEvent>,
) -> Element {
    let mut bridge = use_signal(|| None::<document::Eval>);
    let mut own_scope = use_signal(|| None::<Uuid>);

    let create_container = container.clone();
    let create_source = source.clone();
    let create_config = config.clone();
    use_effect(move || {
        if bridge.peek().is_some() {
            return;
        }
        let eval = document::eval(SELECTOR_BRIDGE_SCRIPT);
        bridge.set(Some(eval.clone()));

        let host = BridgeHost::new(eval);
        match IntervalSelector::new(
            create_container.clone(),
            create_source.clone(),
            create_config.clone(),
            host,
        ) {
            Ok(mut instance) => {
                for kind in EventKind::ALL {
                    instance.on(kind, move |event| on_event.call(event.clone()));
                }
                let scope = instance.scope();
                own_scope.set(Some(scope));
                instance.host().send(BridgeCommand::Bind {
                    video_id: element_id(scope, "video"),
                    canvas_id: element_id(scope, "canvas"),
                    seeker_id: create_config
                        .is_constrained()
                        .then(|| element_id(scope, "seeker")),
                    muted: create_config.muted,
                });
                selector.set(Some(instance));
            }
            Err(err) => error!(%err, "could not create interval selector"),
        }
    });

    use_future(move || async move {
        let mut eval = loop {
            if let Some(eval) = bridge() {
                break eval;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        };
        loop {
            match eval.recv::<BridgeEvent>().await {
                Ok(event) => {
                    if let Some(scope) = *own_scope.peek() {
                        dispatch(selector, scope, event);
                    }
                }
                Err(err) => {
                    debug!(?err, "selector bridge closed");
                    break;
                }
            }
        }
        // The eval never reopens; a live selector left behind stops receiving media events.
        let own = *own_scope.peek();
        let slot = selector.peek();
        let instance = slot.as_ref();
        if owns_live_selector(
            instance.map(|instance| instance.scope()),
            instance.is_some_and(|instance| instance.is_destroyed()),
            own,
        ) {
            warn!(scope = ?own, "selector bridge closed while the selector is still live");
        }
    });

    use_drop(move || {
        let scope = *own_scope.peek();
        if let Ok(mut slot) = selector.try_write() {
            let owned = slot
                .as_ref()
                .is_some_and(|instance| Some(instance.scope()) == scope);
            if owned {
                if let Some(instance) = slot.as_mut() {
                    instance.destroy();
                }
                *slot = None;
            }
        }
        if let Some(eval) = bridge.peek().as_ref() {
            let _ = eval.send(BridgeCommand::Teardown);
        }
    });

    let (scope, view) = {
        let own = own_scope();
        let slot = selector.read();
        match slot.as_ref().filter(|instance| Some(instance.scope()) == own) {
            Some(instance) => (Some(instance.scope()), instance.view().cloned()),
            None => (None, None),
        }
    };
    let width = config.width;
    let height = config.height;

    let Some(scope) = scope else {
        return rsx! {
            div {
                id: "{container}",
                style: "width: {width}px; height: {height}px; background-color: {BG_DEEPEST};",
            }
        };
    };
    // Torn down: the container stays, the widget inside it does not.
    let Some(view) = view else {
        return rsx! {
            div { id: "{container}" }
        };
    };

    let video_id = element_id(scope, "video");
    let canvas_id = element_id(scope, "canvas");
    let seeker_id = element_id(scope, "seeker");
    let video_display = if config.hide_video { "none" } else { "block" };

    rsx! {
        div {
            id: "{container}",
            style: "display: flex; flex-direction: column; width: {width}px; user-select: none;",

            video {
                id: "{video_id}",
                src: "{source}",
                controls: true,
                muted: config.muted,
                preload: "auto",
                style: "display: {video_display}; width: {width}px; margin-bottom: 8px;",
            }

            div {
                style: "position: relative; width: {width}px; height: {height}px; background-color: {BG_DEEPEST}; cursor: pointer;",
                onclick: move |_| toggle_playback(selector),

                canvas {
                    id: "{canvas_id}",
                    width: "{width}",
                    height: "{height}",
                    style: "display: block; width: {width}px; height: {height}px;",
                }
                if view.play_button {
                    OverlayButton {
                        icon: "▶",
                        on_click: move |_| toggle_playback(selector),
                    }
                }
                if view.pause_button {
                    OverlayButton {
                        icon: "❚❚",
                        on_click: move |_| toggle_playback(selector),
                    }
                }
            }

            SelectorTimeline {
                width: f64::from(width),
                fill_pct: view.timeline_fill_pct,
                seeker: view.seeker,
                seeker_id: seeker_id,
                on_seek: move |offset: f64| {
                    let mut slot = selector.write();
                    if let Some(instance) = slot.as_mut() {
                        if instance.seeker().is_some() {
                            return;
                        }
                        if let Err(err) = instance.seek_to(SeekTarget::Offset(offset)) {
                            warn!(%err, "seek failed");
                        }
                        instance.host().send(BridgeCommand::RequestFrame);
                    }
                },
                on_drag_start: move |client_x: f64| {
                    if let Some(instance) = selector.write().as_mut() {
                        instance.drag_start(client_x);
                    }
                },
            }

            if let Some(timer) = view.timer {
                div {
                    style: "margin-top: 6px; font-size: 12px; color: {TEXT_SECONDARY}; font-family: 'SF Mono', Consolas, monospace;",
                    "{timer}"
                }
            }
        }
    }
}

fn toggle_playback(mut selector: Signal<Option<DesktopSelector>>) {
    let mut slot = selector.write();
    let Some(instance) = slot.as_mut() else {
        return;
    };
    instance.play_pause();
    instance.host().send(BridgeCommand::RequestFrame);
}

/// Whether the parent's slot still holds this widget's selector, not yet destroyed.
fn owns_live_selector(slot_scope: Option<Uuid>, slot_destroyed: bool, own: Option<Uuid>) -> bool {
    own.is_some() && slot_scope == own && !slot_destroyed
}

/// Route one bridge message to the controller.
fn dispatch(mut selector: Signal<Option<DesktopSelector>>, scope: Uuid, event: BridgeEvent) {
    let mut slot = selector.write();
    let Some(instance) = slot.as_mut() else {
        return;
    };
    if instance.scope() != scope || instance.is_destroyed() {
        return;
    }
    if let Some(media) = event.media() {
        instance.host_mut().sync(media);
    }

    match event {
        BridgeEvent::Loaded(_) => {
            match instance.on_loaded() {
                Ok(()) => instance.host().send(BridgeCommand::RequestFrame),
                Err(SelectorError::VideoTooShort { .. }) => {}
                Err(err) => error!(%err, "selector failed to initialize"),
            }
            if instance.is_destroyed() {
                instance.host().send(BridgeCommand::Teardown);
            }
        }
        BridgeEvent::CanPlay(_) => {
            if instance.on_can_play() == TickDecision::Continue {
                instance.host().send(BridgeCommand::RequestFrame);
            }
        }
        BridgeEvent::TimeUpdate(_) | BridgeEvent::Frame(_) => {
            if instance.tick() == TickDecision::Continue {
                instance.host().send(BridgeCommand::RequestFrame);
            }
        }
        BridgeEvent::DragStart { client_x } => instance.drag_start(client_x),
        BridgeEvent::DragMove { client_x } => match instance.drag_move(client_x) {
            Ok(Some(_)) => instance.host().send(BridgeCommand::RequestFrame),
            Ok(None) => {}
            Err(err) => warn!(%err, "seeker drag failed"),
        },
        BridgeEvent::DragEnd => instance.drag_end(),
        BridgeEvent::KeyDown { key, editable } => {
            match instance.key_down(&key_from_dom(&key), editable) {
                Ok(true) => instance.host().send(BridgeCommand::RequestFrame),
                Ok(false) => {}
                Err(err) => warn!(%err, "hotkey failed"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_bridge_with_live_selector_is_reported() {
        let own = Uuid::new_v4();
        assert!(owns_live_selector(Some(own), false, Some(own)));
    }

    #[test]
    fn test_closed_bridge_after_teardown_is_quiet() {
        let own = Uuid::new_v4();
        assert!(!owns_live_selector(Some(own), true, Some(own)));
        assert!(!owns_live_selector(None, false, Some(own)));
        assert!(!owns_live_selector(Some(Uuid::new_v4()), false, Some(own)));
        assert!(!owns_live_selector(None, false, None));
    }
}
