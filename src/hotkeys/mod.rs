//! Keyboard shortcuts for the interval selector: space toggles playback,
//! the arrow keys nudge the seeker one pixel.

use dioxus::prelude::Key;

/// All possible actions that can be triggered by hotkeys.
///
/// Each variant represents a semantic action, not a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyAction {
    /// Toggle playback.
    PlayPause,
    /// Nudge the seeker one pixel towards the start.
    StepSeekerBack,
    /// Nudge the seeker one pixel towards the end.
    StepSeekerForward,
}

/// Context information that affects which hotkeys are active.
#[derive(Debug, Clone, Default)]
pub struct HotkeyContext {
    /// Whether a fixed-length seeker is shown (arrow keys need one)
    pub seeker_active: bool,
    /// Whether an input field has focus (should suppress hotkeys)
    pub input_focused: bool,
}

/// Result of processing a key event.
#[derive(Debug, Clone)]
pub enum HotkeyResult {
    /// A hotkey action was matched and should be executed
    Action(HotkeyAction),
    /// No matching hotkey for this key/context combination
    NoMatch,
    /// Hotkey would match but is suppressed (e.g., input field focused)
    Suppressed,
}

/// Build a [`Key`] from a DOM `KeyboardEvent.key` value.
pub fn key_from_dom(name: &str) -> Key {
    match name {
        "ArrowLeft" => Key::ArrowLeft,
        "ArrowRight" => Key::ArrowRight,
        "Spacebar" => Key::Character(" ".to_string()),
        other => Key::Character(other.to_string()),
    }
}

/// Maps a key event to an action, considering the current context.
pub fn handle_hotkey(key: &Key, context: &HotkeyContext) -> HotkeyResult {
    // Suppress hotkeys when typing in an input field
    if context.input_focused {
        return HotkeyResult::Suppressed;
    }

    match key {
        Key::Character(c) if c == " " => return HotkeyResult::Action(HotkeyAction::PlayPause),
        _ => {}
    }

    if context.seeker_active {
        match key {
            Key::ArrowLeft => return HotkeyResult::Action(HotkeyAction::StepSeekerBack),
            Key::ArrowRight => return HotkeyResult::Action(HotkeyAction::StepSeekerForward),
            _ => {}
        }
    }

    HotkeyResult::NoMatch
}
