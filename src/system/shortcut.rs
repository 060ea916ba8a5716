use tauri::AppHandle;
use tauri_plugin_global_shortcut::{GlobalShortcutExt, Shortcut, ShortcutState};

use crate::core::pipeline::PipelineHandle;
use crate::core::shortcut::accelerator;
use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::{SettingKey, SettingsGate};

/// (Re)binds the "show popup" shortcut from the current settings.
/// Any previously registered shortcut is released first.
pub fn register_present_shortcut(
    app: &AppHandle,
    settings: &SettingsGate,
    pipeline: PipelineHandle,
) -> AppResult<()> {
    let accel = accelerator(
        &settings.text(SettingKey::ShortcutPrefix),
        &settings.text(SettingKey::Shortcut),
    );
    let shortcut: Shortcut = accel
        .parse()
        .map_err(|e| AppError::Validation(format!("Invalid shortcut '{}': {}", accel, e)))?;

    let shortcuts = app.global_shortcut();
    if let Err(e) = shortcuts.unregister_all() {
        log::debug!("[Shortcut] Nothing to unregister: {}", e);
    }

    shortcuts
        .on_shortcut(shortcut, move |_app, _shortcut, event| {
            // Fires on press and release; only the press counts.
            if event.state != ShortcutState::Pressed {
                return;
            }
            if let Err(e) = pipeline.present() {
                log::warn!("[Shortcut] Failed to present window: {}", e);
            }
        })
        .map_err(|e| AppError::Settings(format!("Failed to register shortcut '{}': {}", accel, e)))?;

    log::info!("[Shortcut] Registered {}", accel);
    Ok(())
}
