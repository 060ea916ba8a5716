//! IPC surface of the desktop shell.

pub mod commands;
pub mod state;

pub use state::AppState;
