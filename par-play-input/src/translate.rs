//! Event-to-command translation.
//!
//! Each function maps one window-system event to zero or more engine
//! commands. Modifier tokens always compose in the fixed order
//! Ctrl, Alt, Shift, Meta, joined with `+` ahead of the key/button name.

use std::path::PathBuf;

use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, ModifiersState};

use crate::keymap;

/// A single engine command: verb plus positional string arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub verb: &'static str,
    pub args: Vec<String>,
}

impl EngineCommand {
    fn new(verb: &'static str, args: Vec<String>) -> Self {
        Self { verb, args }
    }

    /// Full argv form (verb first) for submission to the engine.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.verb)
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }
}

fn compose(mods: ModifiersState, shift_consumed: bool, name: &str) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(5);
    if mods.control_key() {
        parts.push("Ctrl");
    }
    if mods.alt_key() {
        parts.push("Alt");
    }
    if mods.shift_key() && !shift_consumed {
        parts.push("Shift");
    }
    if mods.super_key() {
        parts.push("Meta");
    }
    parts.push(name);
    parts.join("+")
}

fn action_verb(state: ElementState) -> &'static str {
    match state {
        ElementState::Pressed => "keydown",
        ElementState::Released => "keyup",
    }
}

/// Translate a keyboard event.
///
/// Repeat events are dropped: the engine's key handling is edge-triggered and
/// a synthetic re-press would restart bound actions. Unknown key codes yield
/// no command.
pub fn translate_key(
    key: KeyCode,
    mods: ModifiersState,
    state: ElementState,
    repeat: bool,
) -> Option<EngineCommand> {
    if repeat {
        return None;
    }
    let verb = action_verb(state);

    let (name, shift_consumed) = if mods.shift_key()
        && let Some(symbol) = keymap::shifted_key_name(key)
    {
        (symbol, true)
    } else {
        (keymap::key_name(key)?, false)
    };

    Some(EngineCommand::new(
        verb,
        vec![compose(mods, shift_consumed, name)],
    ))
}

/// Translate a mouse button event. Unknown buttons yield no command.
pub fn translate_mouse_button(
    button: MouseButton,
    mods: ModifiersState,
    state: ElementState,
) -> Option<EngineCommand> {
    let verb = action_verb(state);
    let name = keymap::button_name(button)?;
    Some(EngineCommand::new(verb, vec![compose(mods, false, name)]))
}

/// Translate an absolute cursor position. Sub-pixel precision is not
/// meaningful to the engine, so coordinates truncate to integers.
pub fn translate_cursor(x: f64, y: f64) -> EngineCommand {
    EngineCommand::new("mouse", vec![(x as i64).to_string(), (y as i64).to_string()])
}

/// Translate a scroll event into 0-4 commands.
///
/// Each non-zero axis emits a back-to-back keypress/keyup pair for the wheel
/// token selected by the sign; the engine's wheel handling is edge-triggered
/// per call, not press-and-hold. A diagonal scroll legitimately emits all
/// four.
pub fn translate_scroll(dx: f64, dy: f64) -> Vec<EngineCommand> {
    let mut out = Vec::with_capacity(4);
    if dx.abs() > 0.0 {
        let token = if dx > 0.0 { "WHEEL_LEFT" } else { "WHEEL_RIGHT" };
        out.push(EngineCommand::new("keypress", vec![token.to_string()]));
        out.push(EngineCommand::new("keyup", vec![token.to_string()]));
    }
    if dy.abs() > 0.0 {
        let token = if dy > 0.0 { "WHEEL_UP" } else { "WHEEL_DOWN" };
        out.push(EngineCommand::new("keypress", vec![token.to_string()]));
        out.push(EngineCommand::new("keyup", vec![token.to_string()]));
    }
    out
}

/// Translate a file drop into an ordered playlist load.
///
/// The window system's drop order is unstable, so paths sort
/// lexicographically first; the first path replaces current playback and the
/// rest append, making a multi-file drop a deterministic playlist.
pub fn translate_drop(mut paths: Vec<PathBuf>) -> Vec<EngineCommand> {
    paths.sort();
    paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| {
            let mode = if i == 0 { "replace" } else { "append-play" };
            EngineCommand::new(
                "loadfile",
                vec![path.to_string_lossy().into_owned(), mode.to_string()],
            )
        })
        .collect()
}
