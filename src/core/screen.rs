//! Screen cell model shared between the process collaborator and the pane.
//!
//! The snapshot is sparse on purpose: a column that was never written is
//! *untouched* and must stay distinguishable from a blank cell, otherwise
//! overlapping panes would erase content underneath them.

use std::collections::BTreeMap;

use bitflags::bitflags;
use unicode_width::UnicodeWidthStr;

/// A single cell: one display column's worth of text plus style.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Grapheme occupying this column. Empty means blank.
    pub grapheme: String,
    /// Display width in columns.
    pub width: u8,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            grapheme: String::new(),
            width: 1,
            style: CellStyle::default(),
        }
    }
}

impl Cell {
    /// Build a cell from a grapheme, computing its display width.
    pub fn new(grapheme: impl Into<String>, style: CellStyle) -> Self {
        let grapheme = grapheme.into();
        let width = UnicodeWidthStr::width(grapheme.as_str()).max(1) as u8;
        Self {
            grapheme,
            width,
            style,
        }
    }

    /// The text to draw for this cell (space if blank).
    pub fn display_str(&self) -> &str {
        if self.grapheme.is_empty() {
            " "
        } else {
            &self.grapheme
        }
    }
}

/// Style attributes of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellStyle {
    pub fg: Color,
    pub bg: Color,
    pub flags: AttrFlags,
}

impl CellStyle {
    /// Invert the reverse-video bit. Toggles, never sets.
    pub fn toggle_reverse(&mut self) {
        self.flags.toggle(AttrFlags::INVERSE);
    }
}

/// Color definition
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Color {
    #[default]
    Default,
    Indexed(u8),
    Rgb(u8, u8, u8),
}

impl Color {
    /// Convert to crossterm color, for hosts that flush a surface with it.
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        match self {
            Color::Default => crossterm::style::Color::Reset,
            Color::Indexed(n) => crossterm::style::Color::AnsiValue(*n),
            Color::Rgb(r, g, b) => crossterm::style::Color::Rgb {
                r: *r,
                g: *g,
                b: *b,
            },
        }
    }
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct AttrFlags: u16 {
        const BOLD          = 0b0000_0000_0001;
        const DIM           = 0b0000_0000_0010;
        const ITALIC        = 0b0000_0000_0100;
        const UNDERLINE     = 0b0000_0000_1000;
        const BLINK         = 0b0000_0001_0000;
        const INVERSE       = 0b0000_0010_0000;
        const HIDDEN        = 0b0000_0100_0000;
        const STRIKETHROUGH = 0b0000_1000_0000;
    }
}

/// Cursor position in absolute (scrollback-inclusive) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorPos {
    pub col: u16,
    pub row: usize,
}

/// Input-encoding modes owned by the terminal session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputModes {
    /// DECCKM: arrows send `ESC O x` instead of `ESC [ x`.
    pub application_cursor: bool,
    /// LNM: Enter sends CR LF instead of CR.
    pub linefeed_newline: bool,
    /// Mode 2004: the session wants paste wrapped in bracket markers.
    pub bracketed_paste: bool,
}

/// Active mouse-reporting protocol, highest priority first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseProtocol {
    /// Xterm SGR extended reporting (mode 1006).
    Sgr,
    /// Urxvt decimal reporting (mode 1015).
    Urxvt,
    /// X10 single-byte reporting, limited coordinate range.
    Legacy,
    /// The session did not request mouse reporting.
    None,
}

/// A read-only snapshot of the child terminal's screen.
///
/// Produced wholesale by the process collaborator on every output event.
/// Rows are keyed by absolute index; `line_offset` is the first row
/// currently visible in the pane.
#[derive(Clone, Debug, Default)]
pub struct ScreenSnapshot {
    rows: BTreeMap<usize, BTreeMap<u16, Cell>>,
    pub cursor: CursorPos,
    pub line_offset: usize,
    pub show_cursor: bool,
    pub has_reverse_video: bool,
    pub sgr_mouse: bool,
    pub urxvt_mouse: bool,
    pub legacy_mouse: bool,
    pub input_modes: InputModes,
}

impl ScreenSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a cell at an absolute position.
    pub fn put(&mut self, row: usize, col: u16, cell: Cell) {
        self.rows.entry(row).or_default().insert(col, cell);
    }

    /// Cell at an absolute position, if that column was ever written.
    pub fn cell(&self, row: usize, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Stored cells of one absolute row.
    pub fn row(&self, row: usize) -> Option<&BTreeMap<u16, Cell>> {
        self.rows.get(&row)
    }

    /// Highest absolute row index holding any cell.
    pub fn max_row(&self) -> Option<usize> {
        self.rows.keys().next_back().copied()
    }

    /// Number of tracked rows: one past the highest written row.
    pub fn row_extent(&self) -> usize {
        self.max_row().map_or(0, |r| r + 1)
    }

    /// The protocol the session asked for, checked in priority order.
    pub fn mouse_protocol(&self) -> MouseProtocol {
        if self.sgr_mouse {
            MouseProtocol::Sgr
        } else if self.urxvt_mouse {
            MouseProtocol::Urxvt
        } else if self.legacy_mouse {
            MouseProtocol::Legacy
        } else {
            MouseProtocol::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untouched_is_not_blank() {
        let mut snap = ScreenSnapshot::new();
        snap.put(0, 3, Cell::default());

        assert!(snap.cell(0, 3).is_some());
        assert!(snap.cell(0, 2).is_none());
        assert!(snap.row(1).is_none());
    }

    #[test]
    fn row_extent_tracks_highest_row() {
        let mut snap = ScreenSnapshot::new();
        assert_eq!(snap.row_extent(), 0);

        snap.put(7, 0, Cell::new("x", CellStyle::default()));
        snap.put(2, 0, Cell::new("y", CellStyle::default()));
        assert_eq!(snap.max_row(), Some(7));
        assert_eq!(snap.row_extent(), 8);
    }

    #[test]
    fn mouse_protocol_priority() {
        let mut snap = ScreenSnapshot::new();
        assert_eq!(snap.mouse_protocol(), MouseProtocol::None);

        snap.legacy_mouse = true;
        assert_eq!(snap.mouse_protocol(), MouseProtocol::Legacy);

        snap.urxvt_mouse = true;
        assert_eq!(snap.mouse_protocol(), MouseProtocol::Urxvt);

        snap.sgr_mouse = true;
        assert_eq!(snap.mouse_protocol(), MouseProtocol::Sgr);
    }

    #[test]
    fn reverse_toggles_both_ways() {
        let mut style = CellStyle::default();
        style.toggle_reverse();
        assert!(style.flags.contains(AttrFlags::INVERSE));
        style.toggle_reverse();
        assert!(!style.flags.contains(AttrFlags::INVERSE));
    }

    #[test]
    fn cell_width_follows_grapheme() {
        let narrow = Cell::new("a", CellStyle::default());
        assert_eq!(narrow.width, 1);

        let wide = Cell::new("あ", CellStyle::default());
        assert_eq!(wide.width, 2);

        assert_eq!(Cell::default().display_str(), " ");
    }
}
