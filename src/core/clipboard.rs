//! Clipboard module
//!
//! Detects new clipboard text on a fixed cadence.
//!
//! - `state`: the last-seen text and the attention cooldown clock
//! - `monitor`: the poll step that turns reads into change events

pub mod monitor;
pub mod state;

pub use monitor::{ClipboardChange, ClipboardWatcher};
pub use state::ClipboardSnapshot;

use crate::shared::error::AppResult;

/// OS clipboard, reduced to what the watcher needs.
pub trait ClipboardSource: Send + Sync {
    /// Current plain text on the clipboard, or an empty string.
    fn read_text(&self) -> AppResult<String>;
}
