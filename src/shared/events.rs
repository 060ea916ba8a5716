use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::settings::Settings;

/// Everything the core pushes to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
#[ts(export)]
pub enum AppEvent {
    /// Normalized clipboard text that should replace the source text box.
    #[serde(rename = "clipboard://source-text")]
    SourceTextChanged(String),

    /// Translations in the same order as the requested target languages.
    #[serde(rename = "translation://updated")]
    TranslationsUpdated(Vec<String>),

    #[serde(rename = "translation://cleared")]
    TranslationsCleared,

    #[serde(rename = "translation://failed")]
    TranslationFailed(String),

    #[serde(rename = "settings://updated")]
    SettingsUpdated(Settings),
}

impl AppEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::SourceTextChanged(_) => "clipboard://source-text",
            AppEvent::TranslationsUpdated(_) => "translation://updated",
            AppEvent::TranslationsCleared => "translation://cleared",
            AppEvent::TranslationFailed(_) => "translation://failed",
            AppEvent::SettingsUpdated(_) => "settings://updated",
        }
    }
}
