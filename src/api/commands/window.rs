//! Window management command module

use tauri::State;

use crate::api::AppState;
use crate::shared::error::AppResult;

/// Pin button. While an attention elevation is pending the choice is applied
/// when it reverts.
#[tauri::command]
pub async fn toggle_always_on_top(state: State<'_, AppState>) -> AppResult<bool> {
    state.pipeline.toggle_pinned().await
}

#[tauri::command]
pub fn show_window(state: State<'_, AppState>) -> AppResult<()> {
    state.pipeline.present()
}
