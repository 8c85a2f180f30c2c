//! Line-oriented adapter over the embedded screen.
//!
//! Generic hosts that render text line by line consume this instead of (or
//! in addition to) the compositor: each row becomes an ordered run of
//! (style, grapheme) pairs. The adapter also carries all input toward the
//! session: every key the host receives while the pane is focused is
//! forwarded verbatim, and pasted text travels as one distinguished block.

use crossterm::event::KeyEvent;
use tracing::warn;

use crate::core::process::{ProcessError, ProcessEvent, SubscriptionId, TerminalProcess};
use crate::core::screen::{CellStyle, CursorPos};

/// A blank default-styled cell, used wherever a gap must become drawable.
fn blank() -> (CellStyle, String) {
    (CellStyle::default(), " ".to_string())
}

/// Host-consumable view of a session's screen plus its input funnel.
pub struct PaneContent<P: TerminalProcess> {
    process: P,
}

impl<P: TerminalProcess> PaneContent<P> {
    pub fn new(process: P) -> Self {
        Self { process }
    }

    pub fn process(&self) -> &P {
        &self.process
    }

    pub fn process_mut(&mut self) -> &mut P {
        &mut self.process
    }

    /// The (style, grapheme) run for one absolute row.
    ///
    /// A row is never reported empty: an untouched row yields a single
    /// blank cell, and the cursor row is padded with blanks through the
    /// cursor column so the cursor always has a cell to sit on.
    pub fn line(&self, row: usize) -> Vec<(CellStyle, String)> {
        let Some(snapshot) = self.process.snapshot() else {
            return vec![blank()];
        };

        let stored = snapshot.row(row);
        let mut max_col = stored.and_then(|cells| cells.keys().next_back().copied());
        if row == snapshot.cursor.row {
            max_col = Some(max_col.map_or(snapshot.cursor.col, |m| m.max(snapshot.cursor.col)));
        }

        let Some(max_col) = max_col else {
            return vec![blank()];
        };

        (0..=max_col)
            .map(|col| {
                stored
                    .and_then(|cells| cells.get(&col))
                    .map(|cell| (cell.style, cell.display_str().to_string()))
                    .unwrap_or_else(blank)
            })
            .collect()
    }

    /// Total line count: one past the highest touched row, where the
    /// cursor row counts as touched. Never less than 1.
    pub fn line_count(&self) -> usize {
        match self.process.snapshot() {
            Some(snapshot) => snapshot.row_extent().max(snapshot.cursor.row + 1),
            None => 1,
        }
    }

    /// Cursor position in absolute row coordinates.
    pub fn cursor(&self) -> CursorPos {
        self.process
            .snapshot()
            .map(|snapshot| snapshot.cursor)
            .unwrap_or_default()
    }

    /// While focused, the pane claims every key; nothing is left over for
    /// host-level shortcuts.
    pub fn wants_key(&self, _key: &KeyEvent) -> bool {
        true
    }

    /// Forward one key press to the session as a literal key write.
    ///
    /// Carriage return, linefeed and interrupt get no local treatment;
    /// the session interprets them.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Result<(), ProcessError> {
        self.process.write_key(key).map_err(|err| {
            warn!(%err, "dropping key input");
            err
        })
    }

    /// Forward pasted text as a single bracketed-paste block.
    pub fn handle_paste(&mut self, text: &str) -> Result<(), ProcessError> {
        self.process.write_input(text.as_bytes(), true).map_err(|err| {
            warn!(%err, "dropping pasted input");
            err
        })
    }

    /// Subscribe to the session's output-changed notification, fired once
    /// per asynchronous output event. The host redraw pipeline hangs off
    /// this.
    pub fn on_output_changed(
        &mut self,
        mut callback: impl FnMut() + 'static,
    ) -> SubscriptionId {
        self.process.events().subscribe(move |event| {
            if matches!(event, ProcessEvent::OutputChanged) {
                callback();
            }
        })
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.process.events().unsubscribe(id)
    }
}
