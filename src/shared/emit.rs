use super::events::AppEvent;

/// Sink for events headed to the presentation layer.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AppEvent);
}

#[cfg(feature = "desktop")]
pub use tauri_sink::TauriEventSink;

#[cfg(feature = "desktop")]
mod tauri_sink {
    use super::{AppEvent, EventSink};
    use tauri::{AppHandle, Emitter};

    /// Emits application events to all webview windows.
    pub struct TauriEventSink {
        app: AppHandle,
    }

    impl TauriEventSink {
        pub fn new(app: AppHandle) -> Self {
            Self { app }
        }
    }

    impl EventSink for TauriEventSink {
        fn emit(&self, event: AppEvent) {
            // The event name is the serde rename; the payload goes out bare.
            let name = event.name();
            let result = match &event {
                AppEvent::SourceTextChanged(text) => self.app.emit(name, text),
                AppEvent::TranslationsUpdated(translations) => self.app.emit(name, translations),
                AppEvent::TranslationsCleared => self.app.emit(name, ()),
                AppEvent::TranslationFailed(reason) => self.app.emit(name, reason),
                AppEvent::SettingsUpdated(settings) => self.app.emit(name, settings),
            };
            if let Err(e) = result {
                log::error!("Failed to emit {}: {}", name, e);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Collects every emitted event, in order.
    #[derive(Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<AppEvent>>,
    }

    impl RecordingSink {
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub fn events(&self) -> Vec<AppEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: AppEvent) {
            self.events.lock().unwrap().push(event);
        }
    }
}
