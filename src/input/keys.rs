//! Key event to VT byte-sequence encoding.
//!
//! The embedded session receives keystrokes as the byte sequences a real
//! terminal would emit. Encoding depends on the session's input modes
//! (application cursor keys, linefeed/newline), which travel with the
//! screen snapshot.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::screen::InputModes;

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        result
    }
}

/// Encode a host key event as session input bytes.
///
/// Returns `None` for keys that have no terminal representation (media
/// keys and the like); those are dropped, not buffered.
pub fn encode_key(event: &KeyEvent, modes: &InputModes) -> Option<Vec<u8>> {
    let mods = Modifiers::from(event.modifiers);

    match event.code {
        KeyCode::Char(ch) => Some(encode_char(ch, mods)),

        KeyCode::Enter => {
            if modes.linefeed_newline {
                Some(vec![0x0D, 0x0A])
            } else {
                Some(vec![0x0D])
            }
        }

        KeyCode::Backspace => {
            if mods.contains(Modifiers::ALT) {
                Some(vec![0x1B, 0x7F])
            } else {
                Some(vec![0x7F])
            }
        }

        KeyCode::Tab => {
            if mods.contains(Modifiers::SHIFT) {
                Some(b"\x1b[Z".to_vec())
            } else {
                Some(vec![0x09])
            }
        }

        KeyCode::Esc => Some(vec![0x1B]),

        KeyCode::Up => Some(arrow_key(b'A', mods, modes)),
        KeyCode::Down => Some(arrow_key(b'B', mods, modes)),
        KeyCode::Right => Some(arrow_key(b'C', mods, modes)),
        KeyCode::Left => Some(arrow_key(b'D', mods, modes)),

        KeyCode::Home => Some(special_key(b'H', mods)),
        KeyCode::End => Some(special_key(b'F', mods)),
        KeyCode::PageUp => Some(tilde_key(5, mods)),
        KeyCode::PageDown => Some(tilde_key(6, mods)),
        KeyCode::Insert => Some(tilde_key(2, mods)),
        KeyCode::Delete => Some(tilde_key(3, mods)),

        KeyCode::F(n) => Some(function_key(n, mods)),

        _ => None,
    }
}

/// Character key, including control chords.
fn encode_char(ch: char, mods: Modifiers) -> Vec<u8> {
    if mods.contains(Modifiers::CTRL) && !mods.contains(Modifiers::ALT) {
        if ch.is_ascii_lowercase() {
            return vec![(ch as u8) - b'a' + 1];
        }
        if ch.is_ascii_uppercase() {
            return vec![(ch as u8) - b'A' + 1];
        }
        match ch {
            '@' | '`' | ' ' => return vec![0x00],
            '[' => return vec![0x1B],
            '\\' => return vec![0x1C],
            ']' => return vec![0x1D],
            '^' | '~' => return vec![0x1E],
            '_' | '?' => return vec![0x1F],
            _ => {}
        }
    }

    if mods.contains(Modifiers::CTRL) && mods.contains(Modifiers::ALT) && ch.is_ascii_alphabetic() {
        return vec![0x1B, (ch.to_ascii_lowercase() as u8) - b'a' + 1];
    }

    if mods.contains(Modifiers::ALT) && !mods.contains(Modifiers::CTRL) {
        let mut bytes = vec![0x1B];
        bytes.extend(ch.to_string().as_bytes());
        return bytes;
    }

    ch.to_string().into_bytes()
}

fn arrow_key(key: u8, mods: Modifiers, modes: &InputModes) -> Vec<u8> {
    if !mods.is_empty() {
        format!("\x1b[1;{}{}", modifier_code(mods), key as char).into_bytes()
    } else if modes.application_cursor {
        vec![0x1B, b'O', key]
    } else {
        vec![0x1B, b'[', key]
    }
}

/// Home and End.
fn special_key(key: u8, mods: Modifiers) -> Vec<u8> {
    if mods.is_empty() {
        vec![0x1B, b'[', key]
    } else {
        format!("\x1b[1;{}{}", modifier_code(mods), key as char).into_bytes()
    }
}

/// PageUp, PageDown, Insert, Delete.
fn tilde_key(code: u8, mods: Modifiers) -> Vec<u8> {
    if mods.is_empty() {
        format!("\x1b[{}~", code).into_bytes()
    } else {
        format!("\x1b[{};{}~", code, modifier_code(mods)).into_bytes()
    }
}

fn function_key(n: u8, mods: Modifiers) -> Vec<u8> {
    let base: &[u8] = match n {
        1 => b"\x1bOP",
        2 => b"\x1bOQ",
        3 => b"\x1bOR",
        4 => b"\x1bOS",
        5 => b"\x1b[15~",
        6 => b"\x1b[17~",
        7 => b"\x1b[18~",
        8 => b"\x1b[19~",
        9 => b"\x1b[20~",
        10 => b"\x1b[21~",
        11 => b"\x1b[23~",
        12 => b"\x1b[24~",
        _ => return vec![],
    };

    if mods.is_empty() {
        return base.to_vec();
    }

    let mod_code = modifier_code(mods);
    match n {
        // ESC O X -> ESC [ 1 ; mod X
        1..=4 => format!("\x1b[1;{}{}", mod_code, base[2] as char).into_bytes(),
        // ESC [ n ~ -> ESC [ n ; mod ~
        _ => {
            let code = String::from_utf8_lossy(&base[2..base.len() - 1]).into_owned();
            format!("\x1b[{};{}~", code, mod_code).into_bytes()
        }
    }
}

/// xterm modifier parameter: 1 + shift(1) + alt(2) + ctrl(4).
fn modifier_code(mods: Modifiers) -> u8 {
    1 + if mods.contains(Modifiers::SHIFT) { 1 } else { 0 }
        + if mods.contains(Modifiers::ALT) { 2 } else { 0 }
        + if mods.contains(Modifiers::CTRL) { 4 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn char_keys() {
        let modes = InputModes::default();

        let event = key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(encode_key(&event, &modes), Some(b"a".to_vec()));

        // Ctrl+C, the interrupt byte, goes through unspecialized
        let event = key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(encode_key(&event, &modes), Some(vec![0x03]));

        let event = key(KeyCode::Char('x'), KeyModifiers::ALT);
        assert_eq!(encode_key(&event, &modes), Some(vec![0x1B, b'x']));
    }

    #[test]
    fn enter_follows_linefeed_mode() {
        let event = key(KeyCode::Enter, KeyModifiers::NONE);

        let modes = InputModes::default();
        assert_eq!(encode_key(&event, &modes), Some(vec![0x0D]));

        let modes = InputModes {
            linefeed_newline: true,
            ..InputModes::default()
        };
        assert_eq!(encode_key(&event, &modes), Some(vec![0x0D, 0x0A]));
    }

    #[test]
    fn arrows_follow_cursor_mode() {
        let event = key(KeyCode::Up, KeyModifiers::NONE);

        let modes = InputModes::default();
        assert_eq!(encode_key(&event, &modes), Some(b"\x1b[A".to_vec()));

        let modes = InputModes {
            application_cursor: true,
            ..InputModes::default()
        };
        assert_eq!(encode_key(&event, &modes), Some(b"\x1bOA".to_vec()));

        // Modifiers override application mode
        let event = key(KeyCode::Up, KeyModifiers::CONTROL);
        assert_eq!(encode_key(&event, &modes), Some(b"\x1b[1;5A".to_vec()));
    }

    #[test]
    fn function_keys() {
        let modes = InputModes::default();

        let event = key(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(encode_key(&event, &modes), Some(b"\x1bOP".to_vec()));

        let event = key(KeyCode::F(5), KeyModifiers::NONE);
        assert_eq!(encode_key(&event, &modes), Some(b"\x1b[15~".to_vec()));

        let event = key(KeyCode::F(5), KeyModifiers::SHIFT);
        assert_eq!(encode_key(&event, &modes), Some(b"\x1b[15;2~".to_vec()));
    }

    #[test]
    fn unencodable_keys_are_dropped() {
        let modes = InputModes::default();
        let event = key(KeyCode::CapsLock, KeyModifiers::NONE);
        assert_eq!(encode_key(&event, &modes), None);
    }
}
