//! Fixed key/button name tables.
//!
//! Maps winit key codes to the engine's canonical key names. The tables are
//! not user-configurable; they mirror the engine's input documentation.
//! Only a subset of keys has a shifted variant — for those, Shift is consumed
//! by the remap and must not be re-emitted as a modifier token.

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Canonical (unshifted) engine name for a physical key.
pub fn key_name(key: KeyCode) -> Option<&'static str> {
    let name = match key {
        KeyCode::Space => "SPACE",
        KeyCode::Quote => "'",
        KeyCode::Comma => ",",
        KeyCode::Minus => "-",
        KeyCode::Period => ".",
        KeyCode::Slash => "/",
        KeyCode::Digit0 => "0",
        KeyCode::Digit1 => "1",
        KeyCode::Digit2 => "2",
        KeyCode::Digit3 => "3",
        KeyCode::Digit4 => "4",
        KeyCode::Digit5 => "5",
        KeyCode::Digit6 => "6",
        KeyCode::Digit7 => "7",
        KeyCode::Digit8 => "8",
        KeyCode::Digit9 => "9",
        KeyCode::Semicolon => ";",
        KeyCode::Equal => "=",
        KeyCode::KeyA => "a",
        KeyCode::KeyB => "b",
        KeyCode::KeyC => "c",
        KeyCode::KeyD => "d",
        KeyCode::KeyE => "e",
        KeyCode::KeyF => "f",
        KeyCode::KeyG => "g",
        KeyCode::KeyH => "h",
        KeyCode::KeyI => "i",
        KeyCode::KeyJ => "j",
        KeyCode::KeyK => "k",
        KeyCode::KeyL => "l",
        KeyCode::KeyM => "m",
        KeyCode::KeyN => "n",
        KeyCode::KeyO => "o",
        KeyCode::KeyP => "p",
        KeyCode::KeyQ => "q",
        KeyCode::KeyR => "r",
        KeyCode::KeyS => "s",
        KeyCode::KeyT => "t",
        KeyCode::KeyU => "u",
        KeyCode::KeyV => "v",
        KeyCode::KeyW => "w",
        KeyCode::KeyX => "x",
        KeyCode::KeyY => "y",
        KeyCode::KeyZ => "z",
        KeyCode::BracketLeft => "[",
        KeyCode::Backslash => "\\",
        KeyCode::BracketRight => "]",
        KeyCode::Backquote => "`",

        KeyCode::Escape => "ESC",
        KeyCode::Enter => "ENTER",
        KeyCode::Tab => "TAB",
        KeyCode::Backspace => "BS",
        KeyCode::Insert => "INS",
        KeyCode::Delete => "DEL",
        KeyCode::ArrowRight => "RIGHT",
        KeyCode::ArrowLeft => "LEFT",
        KeyCode::ArrowDown => "DOWN",
        KeyCode::ArrowUp => "UP",
        KeyCode::PageUp => "PGUP",
        KeyCode::PageDown => "PGDWN",
        KeyCode::Home => "HOME",
        KeyCode::End => "END",
        KeyCode::PrintScreen => "PRINT",
        KeyCode::Pause => "PAUSE",
        KeyCode::F1 => "F1",
        KeyCode::F2 => "F2",
        KeyCode::F3 => "F3",
        KeyCode::F4 => "F4",
        KeyCode::F5 => "F5",
        KeyCode::F6 => "F6",
        KeyCode::F7 => "F7",
        KeyCode::F8 => "F8",
        KeyCode::F9 => "F9",
        KeyCode::F10 => "F10",
        KeyCode::F11 => "F11",
        KeyCode::F12 => "F12",
        KeyCode::F13 => "F13",
        KeyCode::F14 => "F14",
        KeyCode::F15 => "F15",
        KeyCode::F16 => "F16",
        KeyCode::F17 => "F17",
        KeyCode::F18 => "F18",
        KeyCode::F19 => "F19",
        KeyCode::F20 => "F20",
        KeyCode::F21 => "F21",
        KeyCode::F22 => "F22",
        KeyCode::F23 => "F23",
        KeyCode::F24 => "F24",
        KeyCode::Numpad0 => "KP0",
        KeyCode::Numpad1 => "KP1",
        KeyCode::Numpad2 => "KP2",
        KeyCode::Numpad3 => "KP3",
        KeyCode::Numpad4 => "KP4",
        KeyCode::Numpad5 => "KP5",
        KeyCode::Numpad6 => "KP6",
        KeyCode::Numpad7 => "KP7",
        KeyCode::Numpad8 => "KP8",
        KeyCode::Numpad9 => "KP9",
        KeyCode::NumpadEnter => "KP_ENTER",
        _ => return None,
    };
    Some(name)
}

/// Symbol produced when Shift is held (US layout subset).
///
/// A hit here means the shifted symbol replaces both the key name and the
/// Shift modifier token (a shifted `1` is `!`, not `Shift+1`).
pub fn shifted_key_name(key: KeyCode) -> Option<&'static str> {
    let name = match key {
        KeyCode::Digit0 => ")",
        KeyCode::Digit1 => "!",
        KeyCode::Digit2 => "@",
        KeyCode::Digit3 => "#",
        KeyCode::Digit4 => "$",
        KeyCode::Digit5 => "%",
        KeyCode::Digit6 => "^",
        KeyCode::Digit7 => "&",
        KeyCode::Digit8 => "*",
        KeyCode::Digit9 => "(",
        KeyCode::Minus => "_",
        KeyCode::Equal => "+",
        KeyCode::BracketLeft => "{",
        KeyCode::BracketRight => "}",
        KeyCode::Backslash => "|",
        KeyCode::Semicolon => ":",
        KeyCode::Quote => "\"",
        KeyCode::Comma => "<",
        KeyCode::Period => ">",
        KeyCode::Slash => "?",
        _ => return None,
    };
    Some(name)
}

/// Engine name for a mouse button. Back/forward use the engine's extended
/// names; buttons beyond these have no engine-side binding.
pub fn button_name(button: MouseButton) -> Option<&'static str> {
    let name = match button {
        MouseButton::Left => "MBTN_LEFT",
        MouseButton::Middle => "MBTN_MID",
        MouseButton::Right => "MBTN_RIGHT",
        MouseButton::Back => "MP_MBTN_BACK",
        MouseButton::Forward => "MP_MBTN_FORWARD",
        MouseButton::Other(_) => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shifted_key_has_a_canonical_name() {
        // The shifted table is a strict refinement of the canonical table:
        // a key that remaps under Shift must also be mapped without it.
        let shifted = [
            KeyCode::Digit0,
            KeyCode::Digit1,
            KeyCode::Digit2,
            KeyCode::Digit3,
            KeyCode::Digit4,
            KeyCode::Digit5,
            KeyCode::Digit6,
            KeyCode::Digit7,
            KeyCode::Digit8,
            KeyCode::Digit9,
            KeyCode::Minus,
            KeyCode::Equal,
            KeyCode::BracketLeft,
            KeyCode::BracketRight,
            KeyCode::Backslash,
            KeyCode::Semicolon,
            KeyCode::Quote,
            KeyCode::Comma,
            KeyCode::Period,
            KeyCode::Slash,
        ];
        for key in shifted {
            assert!(shifted_key_name(key).is_some());
            assert!(key_name(key).is_some(), "{key:?} missing canonical name");
        }
    }

    #[test]
    fn unmapped_keys_yield_none() {
        assert_eq!(key_name(KeyCode::ShiftLeft), None);
        assert_eq!(key_name(KeyCode::CapsLock), None);
        assert_eq!(shifted_key_name(KeyCode::KeyA), None);
    }

    #[test]
    fn extra_mouse_buttons_are_unmapped() {
        assert_eq!(button_name(MouseButton::Other(6)), None);
        assert_eq!(button_name(MouseButton::Back), Some("MP_MBTN_BACK"));
    }
}
