//! Pane configuration.
//!
//! Hosts may load per-pane behavior from a TOML file:
//!
//! ```toml
//! # Pass mouse events through to the embedded session
//! mouse_reporting = true
//!
//! # What the host should do when the child exits: "close" or "hold"
//! exit_behavior = "close"
//! ```
//!
//! Loading is forgiving: a missing or unparsable file yields defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Advisory policy for a pane whose child process exited.
///
/// The host owns the decision; this only records what the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExitBehavior {
    /// Retire the pane once the child exits.
    #[default]
    Close,
    /// Keep showing the last screen after exit.
    Hold,
}

/// Behavior knobs for one embedded pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaneConfig {
    /// Forward mouse events to the session when it asks for them.
    pub mouse_reporting: bool,
    /// What the host should do on child exit.
    pub exit_behavior: ExitBehavior,
}

impl Default for PaneConfig {
    fn default() -> Self {
        Self {
            mouse_reporting: true,
            exit_behavior: ExitBehavior::default(),
        }
    }
}

impl PaneConfig {
    /// Load configuration from a TOML file, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }
}
