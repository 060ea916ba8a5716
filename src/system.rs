//! Tauri-backed implementations of the core ports.

pub mod autostart;
pub mod clipboard;
pub mod shortcut;
pub mod store;
pub mod window;

pub use autostart::TauriAutostart;
pub use clipboard::TauriClipboard;
pub use store::TauriStore;
pub use window::{TauriPopupWindow, TauriScreen};
