use tauri::AppHandle;
use tauri_plugin_clipboard_manager::ClipboardExt;

use crate::core::clipboard::ClipboardSource;
use crate::shared::error::{AppError, AppResult};

/// System clipboard through the clipboard-manager plugin.
pub struct TauriClipboard {
    app: AppHandle,
}

impl TauriClipboard {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl ClipboardSource for TauriClipboard {
    fn read_text(&self) -> AppResult<String> {
        self.app
            .clipboard()
            .read_text()
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}
