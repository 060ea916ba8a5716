use serde_json::Value;
use std::sync::Arc;
use tauri::Wry;
use tauri_plugin_store::Store;

use crate::shared::error::{AppError, AppResult};
use crate::shared::settings::SettingsStore;

/// File name of the plugin store inside the app data directory.
pub const STORE_FILE: &str = "settings.json";

/// Settings backed by `tauri-plugin-store`; every write is saved to disk.
pub struct TauriStore {
    store: Arc<Store<Wry>>,
}

impl TauriStore {
    pub fn new(store: Arc<Store<Wry>>) -> Self {
        Self { store }
    }
}

impl SettingsStore for TauriStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        self.store.set(key, value);
        self.store
            .save()
            .map_err(|e| AppError::Settings(format!("Failed to save {}: {}", STORE_FILE, e)))
    }
}
