//! Host input translation.
//!
//! - **keys**: key events to VT byte sequences
//! - **mouse**: mouse events to the session's reporting protocol

pub mod keys;
pub mod mouse;

pub use keys::{encode_key, Modifiers};
pub use mouse::{translate, MouseAction, PaneMouseEvent, PaneMouseKind};
