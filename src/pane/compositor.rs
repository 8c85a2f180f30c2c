//! Compositing a pane's terminal screen into the shared surface.

use tracing::trace;

use crate::config::PaneConfig;
use crate::core::process::TerminalProcess;
use crate::core::screen::MouseProtocol;
use crate::pane::content::PaneContent;
use crate::pane::surface::{MouseTarget, OutputSurface, PaneId, SurfaceCursor, WriteRegion};

/// One embedded terminal pane.
///
/// Owns the content adapter (and through it the process collaborator) and
/// knows how to composite the current screen into an absolute rectangle of
/// the shared surface. Focus is host-owned and passed into every render
/// call; the pane itself never changes it.
pub struct TerminalPane<P: TerminalProcess> {
    pub id: PaneId,
    content: PaneContent<P>,
    config: PaneConfig,
}

impl<P: TerminalProcess> TerminalPane<P> {
    pub fn new(id: PaneId, process: P) -> Self {
        Self::with_config(id, process, PaneConfig::default())
    }

    pub fn with_config(id: PaneId, process: P, config: PaneConfig) -> Self {
        Self {
            id,
            content: PaneContent::new(process),
            config,
        }
    }

    /// Line-oriented view of the same screen (for hosts that render
    /// through a generic line renderer instead of compositing).
    pub fn content(&self) -> &PaneContent<P> {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut PaneContent<P> {
        &mut self.content
    }

    pub fn config(&self) -> &PaneConfig {
        &self.config
    }

    /// This pane takes whatever space the host gives it.
    pub fn preferred_width(&self) -> Option<u16> {
        None
    }

    pub fn preferred_height(&self) -> Option<u16> {
        None
    }

    /// Composite the current screen into `region` of the shared surface.
    ///
    /// Synchronous and infallible; a session that has produced no output
    /// yet renders as a single blank line. Writes never leave the region,
    /// and cells the source never touched stay untouched on the surface so
    /// overlapping panes underneath keep their content.
    pub fn render(&mut self, surface: &mut OutputSurface, region: WriteRegion, focused: bool) {
        // Size must be applied before the snapshot is read: row wrapping
        // depends on the width. Idempotent per the trait contract.
        self.content
            .process_mut()
            .set_size(region.width, region.height);

        let Some(snapshot) = self.content.process().snapshot() else {
            trace!(pane = self.id, "no snapshot yet, rendering blank line");
            surface.extend_height(region.y + region.height.min(1));
            self.register_mouse(surface, region, 0, focused, MouseProtocol::None);
            return;
        };

        let vertical_scroll = snapshot.line_offset;
        let extent = snapshot.row_extent();

        for y in 0..region.height {
            let abs_row = y as usize + vertical_scroll;
            if abs_row >= extent {
                // Past the last row the source ever touched. Stop instead
                // of blanking: rows below may belong to another pane.
                break;
            }
            if let Some(row) = snapshot.row(abs_row) {
                for (&col, cell) in row.range(..region.width) {
                    surface.put(region.y + y, region.x + col, cell.clone());
                }
            }
        }

        // Screen-wide reverse video: toggle every cell currently inside the
        // region, once per render pass. Toggling (not setting) keeps cells
        // that were already reversed by their own attributes readable.
        if snapshot.has_reverse_video {
            surface.for_each_cell_in_mut(region, |cell| cell.style.toggle_reverse());
        }

        // The surface has a single cursor; only the focused pane may own it.
        if focused {
            let row = (snapshot.cursor.row + region.y as usize).saturating_sub(vertical_scroll);
            surface.cursor = SurfaceCursor {
                col: snapshot.cursor.col.saturating_add(region.x),
                row: row.min(u16::MAX as usize) as u16,
            };
            surface.show_cursor = snapshot.show_cursor;
        }

        surface.extend_height(region.bottom());

        let protocol = snapshot.mouse_protocol();
        self.register_mouse(surface, region, vertical_scroll, focused, protocol);
    }

    fn register_mouse(
        &self,
        surface: &mut OutputSurface,
        region: WriteRegion,
        vertical_scroll: usize,
        focused: bool,
        protocol: MouseProtocol,
    ) {
        surface.mouse.register(MouseTarget {
            pane: self.id,
            region,
            vertical_scroll,
            focused,
            protocol,
            reporting: self.config.mouse_reporting,
        });
    }
}
