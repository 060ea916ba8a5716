use tauri::AppHandle;
use tauri_plugin_autostart::ManagerExt as _;

use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::AutoStartRegistrar;

/// OS login item through the autostart plugin.
pub struct TauriAutostart {
    app: AppHandle,
}

impl TauriAutostart {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl AutoStartRegistrar for TauriAutostart {
    fn register_auto_start(&self, enabled: bool) -> AppResult<()> {
        let launcher = self.app.autolaunch();
        let result = if enabled {
            launcher.enable()
        } else {
            launcher.disable()
        };
        result.map_err(|e| AppError::Settings(format!("Failed to update login item: {}", e)))
    }
}
