//! Runtime configuration
//!
//! Timings, endpoints and window geometry. User preferences live in the
//! settings store instead; see `shared::settings`.

use std::time::Duration;

pub const DEFAULT_TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Window configuration for the popup
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub label: String,
    pub width: f64,
    pub height: f64,
    pub title: String,
}

impl WindowConfig {
    pub fn new(width: f64, height: f64, title: impl Into<String>) -> Self {
        Self {
            label: "main".to_string(),
            width,
            height,
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub poll_interval: Duration,
    /// Minimum gap between two focus-stealing presentations.
    pub attention_cooldown: Duration,
    /// How long the window stays forced on top after a presentation.
    pub attention_revert_delay: Duration,
    pub debounce: Duration,
    /// Vertical gap between the cursor and the popup edge.
    pub cursor_offset: f64,
    pub target_languages: Vec<String>,
    pub translate_endpoint: String,
    pub window: WindowConfig,
    pub start_minimized: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(500),
            attention_cooldown: Duration::from_millis(1000),
            attention_revert_delay: Duration::from_millis(500),
            debounce: Duration::from_millis(300),
            cursor_offset: 38.0,
            target_languages: vec!["en".to_string(), "tr".to_string()],
            translate_endpoint: DEFAULT_TRANSLATE_ENDPOINT.to_string(),
            window: WindowConfig::new(300.0, 500.0, "Clip Translate"),
            start_minimized: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`; malformed values keep the default.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(ms) = parse_millis(&lookup, "CLIP_TRANSLATE_POLL_MS") {
            self.poll_interval = ms;
        }
        if let Some(ms) = parse_millis(&lookup, "CLIP_TRANSLATE_DEBOUNCE_MS") {
            self.debounce = ms;
        }
        if let Some(raw) = lookup("CLIP_TRANSLATE_TARGETS") {
            let targets: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|code| !code.is_empty())
                .map(str::to_string)
                .collect();
            if targets.is_empty() {
                log::warn!("Ignoring CLIP_TRANSLATE_TARGETS={:?}: no language codes", raw);
            } else {
                self.target_languages = targets;
            }
        }
        if let Some(endpoint) = lookup("CLIP_TRANSLATE_ENDPOINT").filter(|v| !v.trim().is_empty()) {
            self.translate_endpoint = endpoint.trim().to_string();
        }
        if lookup("START_MINIMIZED").is_some_and(|v| !v.is_empty()) {
            self.start_minimized = true;
        }
        self
    }
}

fn parse_millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Duration> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Some(Duration::from_millis(ms)),
        _ => {
            log::warn!("Ignoring {}={:?}: expected a positive number of milliseconds", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_popup_behaviour() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval, Duration::from_millis(500));
        assert_eq!(config.attention_cooldown, Duration::from_millis(1000));
        assert_eq!(config.attention_revert_delay, Duration::from_millis(500));
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.target_languages, vec!["en", "tr"]);
        assert_eq!(config.window.width, 300.0);
        assert_eq!(config.window.height, 500.0);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::default().with_overrides(lookup(&[
            ("CLIP_TRANSLATE_POLL_MS", "250"),
            ("CLIP_TRANSLATE_TARGETS", "de, fr ,"),
            ("CLIP_TRANSLATE_ENDPOINT", "http://localhost:9000/t"),
            ("START_MINIMIZED", "1"),
        ]));

        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.target_languages, vec!["de", "fr"]);
        assert_eq!(config.translate_endpoint, "http://localhost:9000/t");
        assert!(config.start_minimized);
    }

    #[test]
    fn test_malformed_overrides_keep_defaults() {
        let config = AppConfig::default().with_overrides(lookup(&[
            ("CLIP_TRANSLATE_DEBOUNCE_MS", "soon"),
            ("CLIP_TRANSLATE_POLL_MS", "0"),
            ("CLIP_TRANSLATE_TARGETS", " , "),
        ]));

        assert_eq!(config, AppConfig::default());
    }
}
