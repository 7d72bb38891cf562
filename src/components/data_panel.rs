use dioxus::prelude::*;
use crate::constants::*;

/// Last `get_data()` result and the error banner.
#[component]
pub fn DataPanel(data_json: Option<String>, error_message: Option<String>) -> Element {
    rsx! {
        div {
            style: "display: flex; flex-direction: column; gap: 10px; width: 100%; max-width: 720px;",
            if let Some(message) = error_message {
                div {
                    style: "padding: 8px 12px; border: 1px solid {ACCENT_ERROR}; border-radius: 4px; color: {ACCENT_ERROR}; font-size: 12px;",
                    "{message}"
                }
            }
            if let Some(json) = data_json {
                pre {
                    style: "margin: 0; padding: 10px 12px; background-color: {BG_ELEVATED}; border: 1px solid {BORDER_SUBTLE}; border-radius: 4px; color: {TEXT_PRIMARY}; font-size: 12px; font-family: 'SF Mono', Consolas, monospace; white-space: pre-wrap;",
                    "{json}"
                }
            }
        }
    }
}
