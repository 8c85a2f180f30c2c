//! The pane: compositing, content adaptation, and the shared surface.
//!
//! - **surface**: the shared per-frame output buffer + mouse registry
//! - **compositor**: `TerminalPane`, copying a screen window into a region
//! - **content**: `PaneContent`, the line-oriented view and input funnel

pub mod compositor;
pub mod content;
pub mod surface;

pub use compositor::TerminalPane;
pub use content::PaneContent;
pub use surface::{MouseRegistry, MouseTarget, OutputSurface, PaneId, SurfaceCursor, WriteRegion};
