//! Shared output surface and region-scoped mouse dispatch.
//!
//! One surface is allocated per host frame; every pane renders into it
//! sequentially and the host flushes it afterwards. Cells are stored
//! sparsely so a pane that skips a cell leaves whatever a pane below it
//! wrote; that is what makes floating panes transparent.

use std::collections::BTreeMap;

use crate::core::screen::{Cell, MouseProtocol};
use crate::input::mouse::{translate, MouseAction, PaneMouseEvent, PaneMouseKind};

/// Unique identifier for a pane, assigned by the host arrangement.
pub type PaneId = u64;

/// The absolute rectangle a pane owns for one render pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl WriteRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column past the region.
    pub fn right(&self) -> u16 {
        self.x + self.width
    }

    /// First row past the region.
    pub fn bottom(&self) -> u16 {
        self.y + self.height
    }

    /// Check if an absolute position is inside this region
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.right() && row >= self.y && row < self.bottom()
    }
}

/// Cursor position on the shared surface (screen coordinates).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceCursor {
    pub col: u16,
    pub row: u16,
}

/// The shared frame buffer all panes composite into.
#[derive(Default)]
pub struct OutputSurface {
    rows: BTreeMap<u16, BTreeMap<u16, Cell>>,
    pub cursor: SurfaceCursor,
    pub show_cursor: bool,
    /// Total height reached so far this frame. Only ever extended.
    pub height: u16,
    pub mouse: MouseRegistry,
}

impl OutputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, row: u16, col: u16, cell: Cell) {
        self.rows.entry(row).or_default().insert(col, cell);
    }

    pub fn cell(&self, row: u16, col: u16) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Stored cells of one surface row.
    pub fn row(&self, row: u16) -> Option<&BTreeMap<u16, Cell>> {
        self.rows.get(&row)
    }

    /// Extend the reported height; never shrinks.
    pub fn extend_height(&mut self, bottom: u16) {
        self.height = self.height.max(bottom);
    }

    /// Run `f` over every cell currently stored inside `region`.
    pub fn for_each_cell_in_mut(&mut self, region: WriteRegion, mut f: impl FnMut(&mut Cell)) {
        for (_, row) in self.rows.range_mut(region.y..region.bottom()) {
            for (_, cell) in row.range_mut(region.x..region.right()) {
                f(cell);
            }
        }
    }
}

/// A registered mouse handler: the data needed to translate an absolute
/// host event for one pane.
#[derive(Clone, Copy, Debug)]
pub struct MouseTarget {
    pub pane: PaneId,
    pub region: WriteRegion,
    pub vertical_scroll: usize,
    pub focused: bool,
    pub protocol: MouseProtocol,
    /// Config gate: when false, focused events are swallowed (focus
    /// requests still go through).
    pub reporting: bool,
}

impl MouseTarget {
    /// Translate an absolute event into pane coordinates and dispatch.
    pub fn dispatch(&self, kind: PaneMouseKind, col: u16, row: u16) -> MouseAction {
        if self.focused && !self.reporting {
            return MouseAction::Ignore;
        }
        let event = PaneMouseEvent {
            kind,
            col: col.saturating_sub(self.region.x) as usize,
            row: row.saturating_sub(self.region.y) as usize + self.vertical_scroll,
        };
        translate(event, self.focused, self.protocol)
    }
}

/// Region-scoped mouse handlers for one frame.
///
/// Later registrations win, matching compositing order: the pane drawn on
/// top of an overlap is the one that owns its clicks.
#[derive(Default)]
pub struct MouseRegistry {
    targets: Vec<MouseTarget>,
}

impl MouseRegistry {
    pub fn register(&mut self, target: MouseTarget) {
        self.targets.push(target);
    }

    /// The topmost target containing an absolute position.
    pub fn target_at(&self, col: u16, row: u16) -> Option<&MouseTarget> {
        self.targets
            .iter()
            .rev()
            .find(|target| target.region.contains(col, row))
    }

    /// Dispatch an absolute event to the pane that owns its position.
    pub fn dispatch(&self, kind: PaneMouseKind, col: u16, row: u16) -> Option<(PaneId, MouseAction)> {
        let target = self.target_at(col, row)?;
        Some((target.pane, target.dispatch(kind, col, row)))
    }

    /// Dispatch a host event directly.
    pub fn dispatch_host(
        &self,
        event: &crossterm::event::MouseEvent,
    ) -> Option<(PaneId, MouseAction)> {
        let kind = PaneMouseKind::from_host(event.kind)?;
        self.dispatch(kind, event.column, event.row)
    }
}
