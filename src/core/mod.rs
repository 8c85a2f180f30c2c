//! Core data model and the process collaborator boundary.
//!
//! - **screen**: cell grid, styles, and the read-only screen snapshot
//! - **process**: the `TerminalProcess` trait plus typed session events
//!
//! # Architecture
//!
//! ```text
//! TerminalProcess (host-provided: pty + parser)
//! └── ScreenSnapshot
//!     ├── sparse rows of Cells
//!     ├── cursor + scroll offset
//!     └── mouse/input mode flags
//! ```

pub mod process;
pub mod screen;
