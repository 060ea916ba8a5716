//! Settings gate
//!
//! Typed read/write access to the persisted user preferences. Every consumer
//! reads through the gate on each event instead of caching values at startup,
//! so a toggle takes effect on the very next trigger.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use ts_rs::TS;

use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    Shortcut,
    ShortcutPrefix,
    KeepInBackground,
    AutoStart,
    RunInBackground,
    ClipboardMonitoringActive,
    FollowMouseCursor,
}

impl SettingKey {
    pub const ALL: [SettingKey; 7] = [
        SettingKey::Shortcut,
        SettingKey::ShortcutPrefix,
        SettingKey::KeepInBackground,
        SettingKey::AutoStart,
        SettingKey::RunInBackground,
        SettingKey::ClipboardMonitoringActive,
        SettingKey::FollowMouseCursor,
    ];

    /// Key under which the value is persisted.
    pub fn as_str(self) -> &'static str {
        match self {
            SettingKey::Shortcut => "shortcut",
            SettingKey::ShortcutPrefix => "shortcut_prefix",
            SettingKey::KeepInBackground => "keep_in_background",
            SettingKey::AutoStart => "auto_start",
            SettingKey::RunInBackground => "run_in_background",
            SettingKey::ClipboardMonitoringActive => "isClipboardMonitoringActive",
            SettingKey::FollowMouseCursor => "followMouseCursor",
        }
    }

    pub fn default_value(self) -> SettingValue {
        match self {
            SettingKey::Shortcut => SettingValue::Text("q".to_string()),
            SettingKey::ShortcutPrefix => SettingValue::Text(default_shortcut_prefix().to_string()),
            SettingKey::KeepInBackground => SettingValue::Bool(true),
            SettingKey::AutoStart => SettingValue::Bool(false),
            SettingKey::RunInBackground => SettingValue::Bool(true),
            SettingKey::ClipboardMonitoringActive => SettingValue::Bool(true),
            SettingKey::FollowMouseCursor => SettingValue::Bool(true),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown setting: {}", s)))
    }
}

pub fn default_shortcut_prefix() -> &'static str {
    if cfg!(target_os = "macos") {
        "option"
    } else {
        "alt"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Text(String),
}

impl SettingValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(value) => Some(*value),
            SettingValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::Text(value) => Some(value),
            SettingValue::Bool(_) => None,
        }
    }

    pub fn same_type(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Bool(value) => Some(SettingValue::Bool(value)),
            Value::String(value) => Some(SettingValue::Text(value)),
            _ => None,
        }
    }

    pub fn into_json(self) -> Value {
        match self {
            SettingValue::Bool(value) => Value::Bool(value),
            SettingValue::Text(value) => Value::String(value),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

/// Full settings snapshot, as shown by the settings drawer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Settings {
    pub shortcut: String,
    pub shortcut_prefix: String,
    pub keep_in_background: bool,
    pub auto_start: bool,
    pub run_in_background: bool,
    pub clipboard_monitoring_active: bool,
    pub follow_mouse_cursor: bool,
}

/// Durable key/value map the gate persists into.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    /// Stores and persists `value` before returning.
    fn set(&self, key: &str, value: Value) -> AppResult<()>;
}

/// OS login-item registration, driven by the `auto_start` setting.
pub trait AutoStartRegistrar: Send + Sync {
    fn register_auto_start(&self, enabled: bool) -> AppResult<()>;
}

/// Non-durable store, used when no config directory is available.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        let values = match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut values = match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Settings persisted as a pretty-printed JSON object on disk.
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    pub fn default_path() -> AppResult<PathBuf> {
        ProjectDirs::from("com", "cliptranslate", "clip-translate")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| AppError::Settings("Failed to determine config directory".to_string()))
    }

    /// Opens the store at `path`. A missing or unreadable file starts empty, so
    /// every key falls back to its default.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Map<String, Value>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    log::warn!("[Settings] Ignoring malformed {}: {}", path.display(), e);
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn persist(&self, values: &Map<String, Value>) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Settings(format!("Failed to create config directory: {}", e)))?;
        }

        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)
            .map_err(|e| AppError::Settings(format!("Failed to write settings file: {}", e)))
    }
}

impl SettingsStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        let values = match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> AppResult<()> {
        let mut values = match self.values.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Memory only changes once the file has been written.
        let mut updated = values.clone();
        updated.insert(key.to_string(), value);
        self.persist(&updated)?;
        *values = updated;
        Ok(())
    }
}

pub struct SettingsGate {
    store: Arc<dyn SettingsStore>,
    autostart: Option<Arc<dyn AutoStartRegistrar>>,
}

impl SettingsGate {
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            autostart: None,
        }
    }

    pub fn with_autostart(mut self, registrar: Arc<dyn AutoStartRegistrar>) -> Self {
        self.autostart = Some(registrar);
        self
    }

    /// Current value of `key`, or its default when unset or stored with the wrong type.
    pub fn value(&self, key: SettingKey) -> SettingValue {
        let default = key.default_value();
        match self.store.get(key.as_str()).map(SettingValue::from_json) {
            Some(Some(value)) if value.same_type(&default) => value,
            None => default,
            Some(_) => {
                log::warn!("[Settings] Stored {} has an unexpected type, using default", key);
                default
            }
        }
    }

    pub fn get(&self, keys: &[SettingKey]) -> Vec<SettingValue> {
        keys.iter().map(|key| self.value(*key)).collect()
    }

    pub fn bool(&self, key: SettingKey) -> bool {
        self.value(key).as_bool().unwrap_or(false)
    }

    pub fn text(&self, key: SettingKey) -> String {
        self.value(key).as_str().unwrap_or_default().to_string()
    }

    pub fn follow_mouse_cursor(&self) -> bool {
        self.bool(SettingKey::FollowMouseCursor)
    }

    pub fn clipboard_monitoring_active(&self) -> bool {
        self.bool(SettingKey::ClipboardMonitoringActive)
    }

    pub fn run_in_background(&self) -> bool {
        self.bool(SettingKey::RunInBackground)
    }

    /// Persists `value` and runs the key's side effect. Only the value type is
    /// checked; content is stored as given.
    pub fn set(&self, key: SettingKey, value: SettingValue) -> AppResult<()> {
        if !value.same_type(&key.default_value()) {
            return Err(AppError::Validation(format!(
                "Setting {} does not accept {:?}",
                key, value
            )));
        }

        let enabled = value.as_bool();
        self.store.set(key.as_str(), value.into_json())?;
        log::debug!("[Settings] {} updated", key);

        if key == SettingKey::AutoStart {
            self.register_auto_start(enabled.unwrap_or(false))?;
        }
        Ok(())
    }

    /// Flips a boolean setting and returns the new value.
    pub fn toggle(&self, key: SettingKey) -> AppResult<bool> {
        let current = self
            .value(key)
            .as_bool()
            .ok_or_else(|| AppError::Validation(format!("Setting {} is not a toggle", key)))?;
        self.set(key, SettingValue::Bool(!current))?;
        Ok(!current)
    }

    pub fn snapshot(&self) -> Settings {
        Settings {
            shortcut: self.text(SettingKey::Shortcut),
            shortcut_prefix: self.text(SettingKey::ShortcutPrefix),
            keep_in_background: self.bool(SettingKey::KeepInBackground),
            auto_start: self.bool(SettingKey::AutoStart),
            run_in_background: self.bool(SettingKey::RunInBackground),
            clipboard_monitoring_active: self.clipboard_monitoring_active(),
            follow_mouse_cursor: self.follow_mouse_cursor(),
        }
    }

    /// macOS has no Alt key label, so the prefix is pinned to `option` there.
    pub fn apply_platform_overrides(&self) -> AppResult<()> {
        if cfg!(target_os = "macos") {
            self.set(SettingKey::ShortcutPrefix, "option".into())?;
        }
        Ok(())
    }

    /// Brings the OS login item in line with the stored `auto_start` value.
    pub fn sync_auto_start(&self) -> AppResult<()> {
        self.register_auto_start(self.bool(SettingKey::AutoStart))
    }

    fn register_auto_start(&self, enabled: bool) -> AppResult<()> {
        match &self.autostart {
            Some(registrar) => registrar.register_auto_start(enabled),
            None => Ok(()),
        }
    }
}
