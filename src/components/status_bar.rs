use dioxus::prelude::*;
use crate::constants::*;

#[component]
pub fn StatusBar(status: String, time_interval: Option<f64>) -> Element {
    let mode = match time_interval {
        Some(interval) => format!("{interval}s window"),
        None => "free scrub".to_string(),
    };
    rsx! {
        div {
            style: "display: flex; align-items: center; justify-content: space-between; height: 22px; padding: 0 14px; background-color: {BG_SURFACE}; border-top: 1px solid {BORDER_DEFAULT}; font-size: 11px; color: {TEXT_DIM};",
            span { "{status}" }
            div {
                style: "display: flex; gap: 16px; font-family: 'SF Mono', Consolas, monospace;",
                span { "{mode}" }
            }
        }
    }
}
