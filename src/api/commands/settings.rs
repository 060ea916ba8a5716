//! Settings command module
//!
//! Reads and writes go through the settings gate so every consumer sees the
//! change on its next event.

use tauri::{AppHandle, State};

use crate::api::AppState;
use crate::shared::error::AppResult;
use crate::shared::settings::{SettingKey, SettingValue};
use crate::system::shortcut::register_present_shortcut;

/// Values for `keys`, in order, with defaults filled in.
#[tauri::command]
pub fn get_settings(keys: Vec<String>, state: State<'_, AppState>) -> AppResult<Vec<SettingValue>> {
    let keys = keys
        .iter()
        .map(|key| key.parse::<SettingKey>())
        .collect::<AppResult<Vec<_>>>()?;
    Ok(state.settings.get(&keys))
}

#[tauri::command]
pub fn set_setting(
    app: AppHandle,
    key: String,
    value: SettingValue,
    state: State<'_, AppState>,
) -> AppResult<()> {
    let key: SettingKey = key.parse()?;
    state.settings.set(key, value)?;

    if matches!(key, SettingKey::Shortcut | SettingKey::ShortcutPrefix) {
        register_present_shortcut(&app, &state.settings, state.pipeline.clone())?;
    }

    state.publish_settings();
    Ok(())
}

/// "Follow mouse cursor" title-bar toggle. Returns the new value.
#[tauri::command]
pub fn toggle_follow_cursor(state: State<'_, AppState>) -> AppResult<bool> {
    let enabled = state.settings.toggle(SettingKey::FollowMouseCursor)?;
    state.publish_settings();
    Ok(enabled)
}

/// "Don't jump with ctrl+c" title-bar toggle. Returns the new value.
#[tauri::command]
pub fn toggle_clipboard_monitoring(state: State<'_, AppState>) -> AppResult<bool> {
    let enabled = state.settings.toggle(SettingKey::ClipboardMonitoringActive)?;
    log::info!(
        "[Settings] Clipboard monitoring {}",
        if enabled { "enabled" } else { "paused" }
    );
    state.publish_settings();
    Ok(enabled)
}
