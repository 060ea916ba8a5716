use tauri::State;

use crate::api::AppState;
use crate::shared::error::AppResult;

/// The user typed in the source box.
#[tauri::command]
pub fn source_text_edited(text: String, state: State<'_, AppState>) -> AppResult<()> {
    state.dispatcher.submit_text(text);
    Ok(())
}

/// A target language picker changed. `index` is the result slot.
#[tauri::command]
pub fn target_language_changed(
    index: usize,
    code: String,
    state: State<'_, AppState>,
) -> AppResult<()> {
    state.dispatcher.set_target_language(index, code);
    Ok(())
}
