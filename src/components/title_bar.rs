use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn TitleBar(
    video_name: Option<String>,
    free_scrub: bool,
    on_open_video: EventHandler<MouseEvent>,
    on_get_data: EventHandler<MouseEvent>,
    on_toggle_free_scrub: EventHandler<MouseEvent>,
) -> Element {
    let scrub_toggle_bg = if free_scrub { BG_HOVER } else { BG_BASE };
    let video_name = video_name.unwrap_or_else(|| "No video".to_string());
    rsx! {
        div {
            style: "
                display: flex; align-items: center; justify-content: space-between;
                height: 40px; padding: 0 16px;
                background-color: {BG_SURFACE}; border-bottom: 1px solid {BORDER_DEFAULT};
                user-select: none;
            ",
            div {
                style: "display: flex; align-items: center; gap: 20px;",
                span { style: "font-size: 13px; font-weight: 600; color: {TEXT_SECONDARY};", "Video Interval Selector" }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_open_video.call(e),
                    "Open Video"
                }
                button {
                    class: "collapse-btn",
                    style: "
                        background: transparent; border: none; color: {TEXT_PRIMARY};
                        font-size: 12px; cursor: pointer; padding: 4px 8px; border-radius: 4px;
                    ",
                    onclick: move |e| on_get_data.call(e),
                    "Get Data"
                }
            }
            span { style: "font-size: 13px; color: {TEXT_MUTED};", "{video_name}" }
            div {
                style: "display: flex; align-items: center; justify-content: flex-end; gap: 6px; min-width: 220px;",
                span {
                    style: "font-size: 10px; color: {TEXT_DIM}; text-transform: uppercase; letter-spacing: 0.6px;",
                    "Free Scrub"
                }
                button {
                    class: "collapse-btn",
                    style: "
                        background: {scrub_toggle_bg};
                        border: 1px solid {BORDER_DEFAULT};
                        color: {TEXT_PRIMARY}; font-size: 11px; cursor: pointer;
                        padding: 4px 10px; border-radius: 999px;
                    ",
                    onclick: move |e| on_toggle_free_scrub.call(e),
                    if free_scrub { "On" } else { "Off" }
                }
            }
        }
    }
}
