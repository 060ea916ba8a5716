use std::sync::Arc;

use crate::core::features::translator::DispatcherHandle;
use crate::core::pipeline::PipelineHandle;
use crate::core::window::PopupWindow;
use crate::shared::emit::EventSink;
use crate::shared::events::AppEvent;
use crate::shared::settings::SettingsGate;

/// Handles shared with every command through `tauri::State`.
pub struct AppState {
    pub settings: Arc<SettingsGate>,
    pub dispatcher: DispatcherHandle,
    pub pipeline: PipelineHandle,
    pub sink: Arc<dyn EventSink>,
    pub window: Arc<dyn PopupWindow>,
}

impl AppState {
    /// Pushes the current settings snapshot to the front end.
    pub fn publish_settings(&self) {
        self.sink
            .emit(AppEvent::SettingsUpdated(self.settings.snapshot()));
    }
}
