use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use super::state::ClipboardSnapshot;
use super::ClipboardSource;
use crate::shared::settings::SettingsGate;

/// A detected clipboard change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardChange {
    /// Raw clipboard text, not yet normalized.
    pub text: String,
    /// Whether this change may bring the window forward. False while the
    /// attention cooldown is running; the text is still delivered.
    pub present: bool,
}

/// Clipboard watcher driven by the pipeline's poll timer
pub struct ClipboardWatcher {
    source: Arc<dyn ClipboardSource>,
    settings: Arc<SettingsGate>,
    snapshot: ClipboardSnapshot,
    attention_cooldown: Duration,
    consecutive_errors: u32,
}

impl ClipboardWatcher {
    pub fn new(
        source: Arc<dyn ClipboardSource>,
        settings: Arc<SettingsGate>,
        attention_cooldown: Duration,
    ) -> Self {
        Self {
            source,
            settings,
            snapshot: ClipboardSnapshot::new(),
            attention_cooldown,
            consecutive_errors: 0,
        }
    }

    pub fn snapshot(&self) -> &ClipboardSnapshot {
        &self.snapshot
    }

    /// One poll cycle. Never fails: a read error counts as "no change".
    pub fn poll(&mut self, now: Instant) -> Option<ClipboardChange> {
        // Monitoring off means no read at all, not a read that is thrown away.
        if !self.settings.clipboard_monitoring_active() {
            return None;
        }

        let text = match self.source.read_text() {
            Ok(text) => {
                self.consecutive_errors = 0;
                text
            }
            Err(e) => {
                self.consecutive_errors += 1;
                // Only log errors occasionally to avoid spam
                if self.consecutive_errors == 1 || self.consecutive_errors % 10 == 0 {
                    log::warn!(
                        "[ClipboardWatcher] Failed to read clipboard (error #{}): {}",
                        self.consecutive_errors,
                        e
                    );
                }
                return None;
            }
        };

        if !self.snapshot.observe(&text) {
            return None;
        }

        let present = self.snapshot.claim_attention(now, self.attention_cooldown);
        log::debug!(
            "[ClipboardWatcher] Detected clipboard change ({} chars, present: {})",
            text.chars().count(),
            present
        );
        Some(ClipboardChange { text, present })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::FakeClipboard;
    use super::*;
    use crate::shared::settings::{MemoryStore, SettingKey};

    const COOLDOWN: Duration = Duration::from_millis(1000);

    fn watcher(clipboard: Arc<FakeClipboard>) -> (ClipboardWatcher, Arc<SettingsGate>) {
        let settings = Arc::new(SettingsGate::new(Arc::new(MemoryStore::new())));
        (ClipboardWatcher::new(clipboard, settings.clone(), COOLDOWN), settings)
    }

    #[test]
    fn test_repeated_identical_reads_emit_once() {
        let clipboard = Arc::new(FakeClipboard::with_text("hello"));
        let (mut watcher, _) = watcher(clipboard.clone());
        let now = Instant::now();

        let first = watcher.poll(now).unwrap();
        assert_eq!(first.text, "hello");
        assert!(first.present);

        for i in 1..=5 {
            assert!(watcher.poll(now + Duration::from_secs(i)).is_none());
        }
        assert_eq!(clipboard.reads(), 6);
    }

    #[test]
    fn test_empty_clipboard_is_not_a_change() {
        let clipboard = Arc::new(FakeClipboard::with_text(""));
        let (mut watcher, _) = watcher(clipboard);
        assert!(watcher.poll(Instant::now()).is_none());
        assert_eq!(watcher.snapshot().text(), "");
    }

    #[test]
    fn test_disabled_monitoring_skips_read() {
        let clipboard = Arc::new(FakeClipboard::with_text("secret"));
        let (mut watcher, settings) = watcher(clipboard.clone());
        settings.set(SettingKey::ClipboardMonitoringActive, false.into()).unwrap();

        assert!(watcher.poll(Instant::now()).is_none());
        assert_eq!(clipboard.reads(), 0);
        assert!(watcher.snapshot().last_attention().is_none());

        // Re-enabling is picked up on the next cycle.
        settings.set(SettingKey::ClipboardMonitoringActive, true.into()).unwrap();
        assert!(watcher.poll(Instant::now()).is_some());
    }

    #[test]
    fn test_read_errors_are_no_change() {
        let clipboard = Arc::new(FakeClipboard::with_text("first"));
        let (mut watcher, _) = watcher(clipboard.clone());
        let now = Instant::now();
        watcher.poll(now).unwrap();

        clipboard.fail();
        for _ in 0..25 {
            assert!(watcher.poll(now).is_none());
        }
        assert_eq!(watcher.snapshot().text(), "first");

        clipboard.set("second");
        assert_eq!(watcher.poll(now + COOLDOWN).unwrap().text, "second");
    }

    #[test]
    fn test_burst_within_cooldown_delivers_without_presenting() {
        let clipboard = Arc::new(FakeClipboard::with_text("one"));
        let (mut watcher, _) = watcher(clipboard.clone());
        let start = Instant::now();

        assert!(watcher.poll(start).unwrap().present);

        clipboard.set("two");
        let second = watcher.poll(start + Duration::from_millis(200)).unwrap();
        assert_eq!(second.text, "two");
        assert!(!second.present);

        clipboard.set("three");
        assert!(watcher.poll(start + Duration::from_millis(1100)).unwrap().present);
    }
}
