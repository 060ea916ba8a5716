//! Core business logic, free of any windowing toolkit.
//!
//! - `clipboard`: change detection and the attention cooldown
//! - `window`: placement math and the attention sequence
//! - `features::translator`: debounced, last-request-wins translation
//! - `pipeline`: the task tying clipboard, window and translator together

pub mod clipboard;
pub mod features;
pub mod pipeline;
pub mod shortcut;
pub mod text;
pub mod window;
