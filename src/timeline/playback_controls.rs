use dioxus::prelude::*;
use crate::constants::{BG_HOVER, TEXT_PRIMARY};

/// Play/pause marker drawn over the canvas
#[component]
pub(crate) fn OverlayButton(
    icon: &'static str,
    on_click: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            class: "collapse-btn",
            style: "position: absolute; left: 50%; top: 50%; transform: translate(-50%, -50%); width: 56px; height: 56px; border: none; border-radius: 50%; background-color: {BG_HOVER}; opacity: 0.85; color: {TEXT_PRIMARY}; font-size: 18px; cursor: pointer; display: flex; align-items: center; justify-content: center; transition: all 0.12s ease;",
            onclick: move |e| {
                e.stop_propagation();
                on_click.call(e);
            },
            "{icon}"
        }
    }
}
