use std::time::Duration;
use tokio::time::Instant;

/// Clipboard state owned by the watcher. Never persisted.
#[derive(Debug, Default, Clone)]
pub struct ClipboardSnapshot {
    text: String,
    last_attention: Option<Instant>,
}

impl ClipboardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn last_attention(&self) -> Option<Instant> {
        self.last_attention
    }

    /// Records `text` if it is new. Returns false for empty or repeated text.
    pub fn observe(&mut self, text: &str) -> bool {
        if text.is_empty() || text == self.text {
            return false;
        }
        self.text = text.to_string();
        true
    }

    /// Takes the right to steal focus at `now`, unless the last presentation
    /// happened less than `cooldown` ago.
    pub fn claim_attention(&mut self, now: Instant, cooldown: Duration) -> bool {
        if let Some(last) = self.last_attention {
            if now.saturating_duration_since(last) < cooldown {
                return false;
            }
        }
        self.last_attention = Some(now);
        true
    }
}
