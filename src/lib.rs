//! termpane - embed live terminal sessions in a text-based UI
//!
//! termpane composites the parsed screen of a child terminal session into a
//! rectangle of a shared host surface, and translates host input back into
//! the byte sequences the session expects.
//!
//! # What it does
//!
//! - **Compositing**: copy the visible window of a terminal screen into an
//!   absolute region of a shared [`OutputSurface`], honoring scroll offset,
//!   screen-wide reverse video, and focus-gated cursor placement, without
//!   clobbering cells that neighboring or underlying panes wrote.
//! - **Content adaptation**: expose the same screen as styled lines through
//!   [`PaneContent`] for hosts that render line by line, and funnel key and
//!   bracketed-paste input to the session.
//! - **Mouse translation**: encode clicks and scrolls in the SGR, urxvt, or
//!   X10 reporting format the session asked for, or turn a click in an
//!   unfocused pane into a focus request.
//!
//! # What it does not do
//!
//! Spawning the child process, pty plumbing, and escape-sequence parsing
//! belong to the host-provided [`TerminalProcess`] collaborator. Pane
//! arrangement (splits, focus bookkeeping) stays with the host, which
//! passes each pane's region and focus state into every render call.
//!
//! # Render cycle
//!
//! ```text
//! host redraw
//!     ↓
//! TerminalPane::render(surface, region, focused)   per pane, in z-order
//!     ↓
//! OutputSurface (cells + cursor + mouse targets)
//!     ↓
//! host flushes the surface, routes mouse events via surface.mouse
//! ```

pub mod config;
pub mod core;
pub mod input;
pub mod pane;

pub use crate::config::{ExitBehavior, PaneConfig};
pub use crate::core::process::{
    ProcessError, ProcessEvent, ProcessEvents, SubscriptionId, TerminalProcess,
};
pub use crate::core::screen::{
    AttrFlags, Cell, CellStyle, Color, CursorPos, InputModes, MouseProtocol, ScreenSnapshot,
};
pub use crate::input::mouse::{MouseAction, PaneMouseEvent, PaneMouseKind};
pub use crate::pane::{
    MouseRegistry, MouseTarget, OutputSurface, PaneContent, PaneId, SurfaceCursor, TerminalPane,
    WriteRegion,
};
