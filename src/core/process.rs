//! Process/screen collaborator boundary.
//!
//! The pane never talks to a pty directly: it consumes a
//! [`TerminalProcess`] that owns the child process, parses its output into a
//! [`ScreenSnapshot`], and accepts input bytes. Output arrival and child
//! exit are surfaced as typed [`ProcessEvent`]s through an explicit
//! subscriber list; the pane merely re-exports them to the host so it can
//! schedule a redraw or retire the pane.

use std::io;

use crossterm::event::KeyEvent;
use thiserror::Error;
use tracing::info;

use super::screen::ScreenSnapshot;
use crate::input::keys::encode_key;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to write to terminal session: {0}")]
    Write(#[source] io::Error),

    #[error("Terminal session has exited")]
    SessionExited,
}

/// Events a terminal session reports to its subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessEvent {
    /// The screen snapshot was replaced; content is dirty.
    OutputChanged,
    /// The child process exited. The host decides what happens to the pane.
    Exited(Option<i32>),
}

/// Identifies one registered subscriber.
pub type SubscriptionId = u64;

/// Explicit subscriber list for session events.
///
/// Subscribers register and unregister by id; there is no implicit global
/// dispatch. `emit` runs every callback exactly once, in registration
/// order, on the caller's thread.
#[derive(Default)]
pub struct ProcessEvents {
    next_id: SubscriptionId,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&ProcessEvent)>)>,
}

impl ProcessEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&ProcessEvent) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, event: ProcessEvent) {
        if let ProcessEvent::Exited(code) = event {
            info!(?code, "terminal session exited");
        }
        for (_, callback) in &mut self.subscribers {
            callback(&event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// The process + screen service a pane composites from.
///
/// Implementations own the pty, the child process, and the escape-sequence
/// parser; this crate only reads the parsed snapshot and writes input.
pub trait TerminalProcess {
    /// Request the terminal to reflow to the given size.
    ///
    /// Must be idempotent: repeating the current dimensions is a no-op with
    /// no reflow side effect. Called once per render pass, before the
    /// snapshot is read, because row wrapping depends on the width.
    fn set_size(&mut self, width: u16, height: u16);

    /// The most recent parsed screen, if any output has arrived yet.
    fn snapshot(&self) -> Option<&ScreenSnapshot>;

    /// Write raw bytes to the session's input stream.
    ///
    /// `paste` marks the data as one pasted block; the session wraps it in
    /// bracketed-paste markers when the child requested mode 2004.
    fn write_input(&mut self, data: &[u8], paste: bool) -> Result<(), ProcessError>;

    /// Write a single recognized key event.
    ///
    /// The default implementation encodes the key against the snapshot's
    /// input modes and forwards the bytes. Keys with no VT encoding are
    /// dropped.
    fn write_key(&mut self, key: &KeyEvent) -> Result<(), ProcessError> {
        let modes = self
            .snapshot()
            .map(|snap| snap.input_modes)
            .unwrap_or_default();
        match encode_key(key, &modes) {
            Some(bytes) => self.write_input(&bytes, false),
            None => Ok(()),
        }
    }

    /// The session's event subscriber list.
    fn events(&mut self) -> &mut ProcessEvents;
}
