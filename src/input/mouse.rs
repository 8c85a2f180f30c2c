//! Mouse event translation for the embedded session.
//!
//! Terminal programs request mouse reporting in one of three wire formats;
//! the encodings here are bit-exact xterm formats, and any deviation breaks
//! programs that parse them. A click in an unfocused pane never reaches the
//! session: it only asks the host to focus the pane.

use crossterm::event::MouseEventKind;

use crate::core::screen::MouseProtocol;

/// Mouse event kinds the session can be told about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaneMouseKind {
    Press,
    Release,
    ScrollUp,
    ScrollDown,
}

impl PaneMouseKind {
    /// Adapt a host event kind. Drag and bare movement have no pane-local
    /// meaning and yield `None`.
    pub fn from_host(kind: MouseEventKind) -> Option<Self> {
        match kind {
            MouseEventKind::Down(_) => Some(Self::Press),
            MouseEventKind::Up(_) => Some(Self::Release),
            MouseEventKind::ScrollUp => Some(Self::ScrollUp),
            MouseEventKind::ScrollDown => Some(Self::ScrollDown),
            _ => None,
        }
    }
}

/// A mouse event in pane-relative coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaneMouseEvent {
    pub kind: PaneMouseKind,
    pub col: usize,
    pub row: usize,
}

/// What the host should do with a translated mouse event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MouseAction {
    /// Write these bytes to the session's input stream.
    Send(Vec<u8>),
    /// Focus this pane.
    RequestFocus,
    /// Nothing to do.
    Ignore,
}

/// Translate one mouse event against the pane's focus state and the
/// session's active reporting protocol.
pub fn translate(event: PaneMouseEvent, focused: bool, protocol: MouseProtocol) -> MouseAction {
    if !focused {
        return match event.kind {
            PaneMouseKind::Release => MouseAction::RequestFocus,
            _ => MouseAction::Ignore,
        };
    }

    match protocol {
        MouseProtocol::Sgr => MouseAction::Send(encode_sgr(event)),
        MouseProtocol::Urxvt => MouseAction::Send(encode_urxvt(event)),
        MouseProtocol::Legacy => match encode_legacy(event) {
            Some(bytes) => MouseAction::Send(bytes),
            None => MouseAction::Ignore,
        },
        MouseProtocol::None => MouseAction::Ignore,
    }
}

/// Xterm SGR (1006): `ESC [ < code ; col+1 ; row+1 M` (`m` on release).
fn encode_sgr(event: PaneMouseEvent) -> Vec<u8> {
    let (code, final_byte) = match event.kind {
        PaneMouseKind::Press => (0, 'M'),
        PaneMouseKind::Release => (0, 'm'),
        PaneMouseKind::ScrollUp => (64, 'M'),
        PaneMouseKind::ScrollDown => (65, 'M'),
    };
    format!(
        "\x1b[<{};{};{}{}",
        code,
        event.col + 1,
        event.row + 1,
        final_byte
    )
    .into_bytes()
}

/// Urxvt (1015): `ESC [ code ; col+1 ; row+1 M`.
fn encode_urxvt(event: PaneMouseEvent) -> Vec<u8> {
    let code = match event.kind {
        PaneMouseKind::Press => 32,
        PaneMouseKind::Release => 35,
        PaneMouseKind::ScrollUp => 96,
        PaneMouseKind::ScrollDown => 97,
    };
    format!("\x1b[{};{};{}M", code, event.col + 1, event.row + 1).into_bytes()
}

/// X10: `ESC [ M` plus three raw bytes. Single-byte coordinates cap the
/// reportable range; events beyond it are dropped.
fn encode_legacy(event: PaneMouseEvent) -> Option<Vec<u8>> {
    if event.col >= 96 || event.row >= 96 {
        return None;
    }
    let code: u8 = match event.kind {
        PaneMouseKind::Press => 32,
        PaneMouseKind::Release => 35,
        PaneMouseKind::ScrollUp => 96,
        PaneMouseKind::ScrollDown => 97,
    };
    Some(vec![
        0x1B,
        b'[',
        b'M',
        code,
        event.col as u8 + 33,
        event.row as u8 + 33,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(kind: PaneMouseKind, col: usize, row: usize) -> PaneMouseEvent {
        PaneMouseEvent { kind, col, row }
    }

    #[test]
    fn sgr_press_and_release() {
        let action = translate(event(PaneMouseKind::Press, 3, 4), true, MouseProtocol::Sgr);
        assert_eq!(action, MouseAction::Send(b"\x1b[<0;4;5M".to_vec()));

        let action = translate(event(PaneMouseKind::Release, 3, 4), true, MouseProtocol::Sgr);
        assert_eq!(action, MouseAction::Send(b"\x1b[<0;4;5m".to_vec()));
    }

    #[test]
    fn sgr_scroll_codes() {
        let action = translate(event(PaneMouseKind::ScrollUp, 5, 5), true, MouseProtocol::Sgr);
        assert_eq!(action, MouseAction::Send(b"\x1b[<64;6;6M".to_vec()));

        let action = translate(event(PaneMouseKind::ScrollDown, 5, 5), true, MouseProtocol::Sgr);
        assert_eq!(action, MouseAction::Send(b"\x1b[<65;6;6M".to_vec()));
    }

    #[test]
    fn urxvt_encoding() {
        let action = translate(event(PaneMouseKind::ScrollUp, 0, 0), true, MouseProtocol::Urxvt);
        assert_eq!(action, MouseAction::Send(b"\x1b[96;1;1M".to_vec()));

        let action = translate(event(PaneMouseKind::Press, 10, 5), true, MouseProtocol::Urxvt);
        assert_eq!(action, MouseAction::Send(b"\x1b[32;11;6M".to_vec()));
    }

    #[test]
    fn legacy_encoding_raw_bytes() {
        let action = translate(event(PaneMouseKind::Press, 0, 0), true, MouseProtocol::Legacy);
        assert_eq!(action, MouseAction::Send(vec![0x1B, b'[', b'M', 32, 33, 33]));

        let action = translate(
            event(PaneMouseKind::Release, 10, 5),
            true,
            MouseProtocol::Legacy,
        );
        assert_eq!(action, MouseAction::Send(vec![0x1B, b'[', b'M', 35, 43, 38]));
    }

    #[test]
    fn legacy_out_of_range_is_dropped() {
        let action = translate(event(PaneMouseKind::Press, 100, 0), true, MouseProtocol::Legacy);
        assert_eq!(action, MouseAction::Ignore);

        let action = translate(event(PaneMouseKind::Press, 0, 96), true, MouseProtocol::Legacy);
        assert_eq!(action, MouseAction::Ignore);

        // 95 is the last single-byte coordinate still in range
        let action = translate(event(PaneMouseKind::Press, 95, 95), true, MouseProtocol::Legacy);
        assert_eq!(
            action,
            MouseAction::Send(vec![0x1B, b'[', b'M', 32, 128, 128])
        );
    }

    #[test]
    fn unfocused_release_requests_focus() {
        for protocol in [
            MouseProtocol::Sgr,
            MouseProtocol::Urxvt,
            MouseProtocol::Legacy,
            MouseProtocol::None,
        ] {
            let action = translate(event(PaneMouseKind::Release, 40, 12), false, protocol);
            assert_eq!(action, MouseAction::RequestFocus);

            let action = translate(event(PaneMouseKind::Press, 40, 12), false, protocol);
            assert_eq!(action, MouseAction::Ignore);

            let action = translate(event(PaneMouseKind::ScrollUp, 40, 12), false, protocol);
            assert_eq!(action, MouseAction::Ignore);
        }
    }

    #[test]
    fn focused_without_protocol_ignores_everything() {
        for kind in [
            PaneMouseKind::Press,
            PaneMouseKind::Release,
            PaneMouseKind::ScrollUp,
            PaneMouseKind::ScrollDown,
        ] {
            let action = translate(event(kind, 1, 1), true, MouseProtocol::None);
            assert_eq!(action, MouseAction::Ignore);
        }
    }

    #[test]
    fn host_kind_adaptation() {
        use crossterm::event::MouseButton;

        assert_eq!(
            PaneMouseKind::from_host(MouseEventKind::Down(MouseButton::Left)),
            Some(PaneMouseKind::Press)
        );
        assert_eq!(
            PaneMouseKind::from_host(MouseEventKind::Up(MouseButton::Right)),
            Some(PaneMouseKind::Release)
        );
        assert_eq!(
            PaneMouseKind::from_host(MouseEventKind::ScrollUp),
            Some(PaneMouseKind::ScrollUp)
        );
        assert_eq!(
            PaneMouseKind::from_host(MouseEventKind::Moved),
            None
        );
        assert_eq!(
            PaneMouseKind::from_host(MouseEventKind::Drag(MouseButton::Left)),
            None
        );
    }
}
