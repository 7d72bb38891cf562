use dioxus::prelude::*;
use crate::constants::{
    ACCENT_PLAYHEAD, ACCENT_SEEKER, BG_SURFACE, BORDER_DEFAULT, TIMELINE_HEIGHT_PX,
};
use crate::selector::SeekerView;

/// Timeline bar under the canvas.
///
/// The fill shows playback progress over the whole video. In constrained
/// mode a seeker marks the selectable window and is dragged to move it; in
/// free mode a click anywhere on the track seeks.
#[component]
pub(crate) fn SelectorTimeline(
    width: f64,
    fill_pct: f64,
    seeker: Option<SeekerView>,
    seeker_id: String,
    /// Click offset from the track's left edge, in pixels.
    on_seek: EventHandler<f64>,
    /// Pointer x in client coordinates.
    on_drag_start: EventHandler<f64>,
) -> Element {
    let fill_pct = fill_pct.clamp(0.0, 100.0);
    let cursor = if seeker.is_some() { "default" } else { "pointer" };
    let style = track_style(width, cursor);

    rsx! {
        div {
            style: "{style}",
            onmousedown: move |e| {
                // element_coordinates is relative to the track itself
                e.prevent_default();
                on_seek.call(e.element_coordinates().x);
            },

            // Progress fill, transparent to clicks
            div {
                style: "
                    position: absolute;
                    left: 0;
                    top: 0;
                    width: {fill_pct}%;
                    height: 100%;
                    background-color: {ACCENT_PLAYHEAD};
                    opacity: 0.35;
                    pointer-events: none;
                ",
            }

            if let Some(seeker) = seeker {
                div {
                    id: "{seeker_id}",
                    style: "
                        position: absolute;
                        left: {seeker.left_px}px;
                        top: -2px;
                        width: {seeker.width_px}px;
                        height: calc(100% + 4px);
                        border: 2px solid {ACCENT_SEEKER};
                        box-sizing: border-box;
                        border-radius: 3px;
                        cursor: ew-resize;
                        overflow: hidden;
                    ",
                    onmousedown: move |e| {
                        e.prevent_default();
                        e.stop_propagation();
                        on_drag_start.call(e.client_coordinates().x);
                    },
                    div {
                        style: "
                            width: {seeker.fill_pct}%;
                            height: 100%;
                            background-color: {ACCENT_SEEKER};
                            opacity: 0.45;
                            pointer-events: none;
                        ",
                    }
                }
            }
        }
    }
}

/// Track box style. The outline is an inset shadow so the content box stays
/// exactly `width` pixels wide: seeker `left` and click offsets are measured
/// against it and must match the controller's track.
fn track_style(width: f64, cursor: &str) -> String {
    format!(
        "position: relative; width: {width}px; height: {TIMELINE_HEIGHT_PX}px; \
         margin-top: 6px; padding: 0; border: none; box-sizing: content-box; \
         background-color: {BG_SURFACE}; box-shadow: inset 0 0 0 1px {BORDER_DEFAULT}; \
         cursor: {cursor};"
    )
}
