//! Command modules for the Tauri application
//!
//! - `settings`: typed settings access and the title-bar toggles
//! - `translation`: source text and target language edits
//! - `window`: user-driven window actions

pub mod settings;
pub mod translation;
pub mod window;
