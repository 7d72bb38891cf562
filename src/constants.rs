//! Shared UI constants such as colors, sizing, and the webview bridge script.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_SUBTLE: &str = "#1f1f1f";
pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT_SEEKER: &str = "#f97316";
pub const ACCENT_PLAYHEAD: &str = "#22c55e";
pub const ACCENT_ERROR: &str = "#ef4444";

pub const TIMELINE_HEIGHT_PX: u32 = 20;
pub const WINDOW_WIDTH: f64 = 1000.0;
pub const WINDOW_HEIGHT: f64 = 720.0;

/// Interval used when switching from free scrubbing back to a fixed window
/// and the launch config had none.
pub const FALLBACK_TIME_INTERVAL_SECONDS: f64 = 5.0;

/// Webview side of the selector bridge.
///
/// Receives `BridgeCommand`s, owns the document/video listeners, and reports
/// `BridgeEvent`s back. Frames are requested one at a time; a pending
/// request is never duplicated.
pub const SELECTOR_BRIDGE_SCRIPT: &str = r#"
let video = null;
let canvas = null;
let ctx = null;
let seeker = null;
let frameRequested = false;
let cleanup = [];
const handlers = {};

function snapshot(kind) {
    const duration = video ? video.duration : NaN;
    return {
        kind: kind,
        current_time: video ? video.currentTime : 0,
        duration: Number.isFinite(duration) ? duration : null,
        paused: video ? video.paused : true,
        ended: video ? video.ended : false
    };
}

function pointerX(event) {
    if (event.touches && event.touches.length) {
        return event.touches[0].clientX;
    }
    if (event.changedTouches && event.changedTouches.length) {
        return event.changedTouches[0].clientX;
    }
    return event.clientX;
}

function listen(target, name, fn, options) {
    target.addEventListener(name, fn, options);
    cleanup.push(() => target.removeEventListener(name, fn, options));
}

function bind(msg) {
    video = document.getElementById(msg.video_id);
    canvas = document.getElementById(msg.canvas_id);
    seeker = msg.seeker_id ? document.getElementById(msg.seeker_id) : null;
    if (!video || !canvas || (msg.seeker_id && !seeker)) {
        setTimeout(() => bind(msg), 50);
        return;
    }
    ctx = canvas.getContext("2d");
    video.muted = msg.muted;
    listen(video, "loadeddata", () => dioxus.send(snapshot("loaded")));
    listen(video, "canplay", () => dioxus.send(snapshot("can_play")));
    listen(video, "timeupdate", () => dioxus.send(snapshot("time_update")));
    if (seeker) {
        listen(seeker, "touchstart", (event) => {
            event.preventDefault();
            dioxus.send({ kind: "drag_start", client_x: pointerX(event) });
        }, { passive: false });
    }
    video.load();
}

function makeHandler(listener) {
    switch (listener) {
        case "dragMove":
            return (event) => {
                event.preventDefault();
                dioxus.send({ kind: "drag_move", client_x: pointerX(event) });
            };
        case "dragEnd":
            return (event) => {
                event.preventDefault();
                dioxus.send({ kind: "drag_end" });
            };
        case "keyDown":
            return (event) => {
                const target = event.target;
                const editable = !!target && (target.isContentEditable ||
                    ["INPUT", "TEXTAREA", "SELECT"].includes(target.tagName));
                dioxus.send({ kind: "key_down", key: event.key, editable: editable });
            };
    }
    return null;
}

function attach(msg) {
    if (handlers[msg.listener]) {
        return;
    }
    const fn = makeHandler(msg.listener);
    if (!fn) {
        return;
    }
    for (const name of msg.events) {
        document.addEventListener(name, fn, { passive: false });
    }
    handlers[msg.listener] = { events: msg.events, fn: fn };
}

function detach(listener) {
    const entry = handlers[listener];
    if (!entry) {
        return;
    }
    for (const name of entry.events) {
        document.removeEventListener(name, entry.fn);
    }
    delete handlers[listener];
}

bridge: while (true) {
    const msg = await dioxus.recv();
    if (!msg) {
        continue;
    }
    switch (msg.kind) {
        case "bind":
            bind(msg);
            break;
        case "play":
            if (video) {
                const pending = video.play();
                if (pending && pending.catch) {
                    pending.catch(() => {});
                }
            }
            break;
        case "pause":
            if (video) {
                video.pause();
            }
            break;
        case "seek":
            if (video && Number.isFinite(msg.time)) {
                video.currentTime = msg.time;
            }
            break;
        case "draw":
            if (ctx && video) {
                try {
                    ctx.drawImage(video, 0, 0, msg.width, msg.height);
                } catch (_) {
                    // Frame not decodable yet.
                }
            }
            break;
        case "request_frame":
            if (!frameRequested) {
                frameRequested = true;
                requestAnimationFrame(() => {
                    frameRequested = false;
                    dioxus.send(snapshot("frame"));
                });
            }
            break;
        case "attach":
            attach(msg);
            break;
        case "detach":
            detach(msg.listener);
            break;
        case "teardown":
            for (const listener of Object.keys(handlers)) {
                detach(listener);
            }
            for (const undo of cleanup) {
                undo();
            }
            cleanup = [];
            video = null;
            canvas = null;
            ctx = null;
            seeker = null;
            break bridge;
    }
}
"#;
