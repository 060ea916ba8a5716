//! Translation dispatcher
//!
//! Idle -> Debouncing -> Requesting -> (Delivering | Failed) -> Idle
//!
//! Runs as one task that owns all state. Every text or target change restarts
//! the debounce timer; a settle issues one request with one concurrent call per
//! target language. Results are applied strictly by sequence number: anything
//! older than the latest issued request is dropped on arrival. Superseded calls
//! are never aborted, only ignored.

use futures::future::{join_all, BoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use super::types::{TranslationRequest, TranslationResult};
use super::Translator;
use crate::config::AppConfig;
use crate::core::text::normalize_whitespace;
use crate::shared::emit::EventSink;
use crate::shared::error::AppResult;
use crate::shared::events::AppEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct DispatcherConfig {
    pub debounce: Duration,
    pub target_languages: Vec<String>,
}

impl From<&AppConfig> for DispatcherConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            debounce: config.debounce,
            target_languages: config.target_languages.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchInput {
    /// Clipboard delivery or a user edit; normalized on arrival.
    SourceText(String),
    TargetLanguage { index: usize, code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchPhase {
    Idle,
    Debouncing,
    Requesting,
}

/// Cheap, cloneable sender side of the dispatcher.
#[derive(Clone)]
pub struct DispatcherHandle {
    tx: mpsc::UnboundedSender<DispatchInput>,
}

impl DispatcherHandle {
    pub fn submit_text(&self, text: impl Into<String>) {
        self.send(DispatchInput::SourceText(text.into()));
    }

    pub fn set_target_language(&self, index: usize, code: impl Into<String>) {
        self.send(DispatchInput::TargetLanguage {
            index,
            code: code.into(),
        });
    }

    fn send(&self, input: DispatchInput) {
        if self.tx.send(input).is_err() {
            log::warn!("[TranslationDispatcher] Dispatcher has stopped, input dropped");
        }
    }
}

struct Completion {
    request: TranslationRequest,
    result: TranslationResult,
}

pub struct TranslationDispatcher {
    translator: Arc<dyn Translator>,
    sink: Arc<dyn EventSink>,
    debounce: Duration,
    targets: Vec<String>,
    source_text: String,
    settle_at: Option<Instant>,
    phase: DispatchPhase,
    latest_seq: u64,
    last_issued: Option<TranslationRequest>,
    last_failed: bool,
    inputs: mpsc::UnboundedReceiver<DispatchInput>,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
}

impl TranslationDispatcher {
    pub fn new(
        translator: Arc<dyn Translator>,
        sink: Arc<dyn EventSink>,
        config: DispatcherConfig,
    ) -> (Self, DispatcherHandle) {
        let (tx, inputs) = mpsc::unbounded_channel();
        let dispatcher = Self {
            translator,
            sink,
            debounce: config.debounce,
            targets: config.target_languages,
            source_text: String::new(),
            settle_at: None,
            phase: DispatchPhase::Idle,
            latest_seq: 0,
            last_issued: None,
            last_failed: false,
            inputs,
            in_flight: FuturesUnordered::new(),
        };
        (dispatcher, DispatcherHandle { tx })
    }

    /// Event loop. Returns once every handle has been dropped.
    pub async fn run(mut self) {
        log::info!("[TranslationDispatcher] Started with targets {:?}", self.targets);

        loop {
            let settle_at = self.settle_at;
            tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(input) => self.on_input(input, Instant::now()),
                    None => break,
                },
                _ = sleep_until(settle_at.unwrap_or_else(Instant::now)), if settle_at.is_some() => {
                    self.settle();
                }
                Some(done) = self.in_flight.next(), if !self.in_flight.is_empty() => {
                    self.on_complete(done);
                }
            }
        }

        log::info!("[TranslationDispatcher] Stopped");
    }

    fn on_input(&mut self, input: DispatchInput, now: Instant) {
        match input {
            DispatchInput::SourceText(text) => {
                self.source_text = normalize_whitespace(&text);
            }
            DispatchInput::TargetLanguage { index, code } => match self.targets.get_mut(index) {
                Some(slot) => *slot = code,
                None => {
                    log::warn!(
                        "[TranslationDispatcher] No target slot {} (have {})",
                        index,
                        self.targets.len()
                    );
                    return;
                }
            },
        }

        self.settle_at = Some(now + self.debounce);
        self.set_phase(DispatchPhase::Debouncing);
    }

    fn settle(&mut self) {
        self.settle_at = None;

        if self.source_text.is_empty() {
            // Bump the sequence so a request still in flight cannot refill the slots.
            self.latest_seq += 1;
            self.last_issued = None;
            self.sink.emit(AppEvent::TranslationsCleared);
            self.set_phase(self.resting_phase());
            return;
        }

        if let Some(last) = &self.last_issued {
            if !self.last_failed && last.same_work(&self.source_text, &self.targets) {
                log::debug!("[TranslationDispatcher] Settled on unchanged input, nothing to do");
                self.set_phase(self.resting_phase());
                return;
            }
        }

        self.latest_seq += 1;
        let request = TranslationRequest {
            seq: self.latest_seq,
            source_text: self.source_text.clone(),
            target_languages: self.targets.clone(),
        };
        log::debug!(
            "[TranslationDispatcher] Issuing request #{} ({} chars -> {:?})",
            request.seq,
            request.source_text.chars().count(),
            request.target_languages
        );

        self.last_issued = Some(request.clone());
        self.last_failed = false;
        self.in_flight
            .push(Box::pin(execute(self.translator.clone(), request)));
        self.set_phase(DispatchPhase::Requesting);
    }

    fn on_complete(&mut self, done: Completion) {
        if done.request.seq < self.latest_seq {
            log::debug!(
                "[TranslationDispatcher] Discarding stale result #{} (latest #{})",
                done.request.seq,
                self.latest_seq
            );
            return;
        }

        match done.result {
            TranslationResult::Success(translations) => {
                self.sink.emit(AppEvent::TranslationsUpdated(translations));
            }
            TranslationResult::Failure(reason) => {
                log::warn!("[TranslationDispatcher] Request #{} failed: {}", done.request.seq, reason);
                self.last_failed = true;
                self.sink.emit(AppEvent::TranslationFailed(reason));
            }
        }
        self.set_phase(self.resting_phase());
    }

    fn resting_phase(&self) -> DispatchPhase {
        if self.settle_at.is_some() {
            DispatchPhase::Debouncing
        } else if !self.in_flight.is_empty() {
            DispatchPhase::Requesting
        } else {
            DispatchPhase::Idle
        }
    }

    fn set_phase(&mut self, phase: DispatchPhase) {
        if self.phase != phase {
            log::trace!("[TranslationDispatcher] {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

/// Fans out one call per target language and waits for all of them.
async fn execute(translator: Arc<dyn Translator>, request: TranslationRequest) -> Completion {
    let calls = request
        .target_languages
        .iter()
        .map(|lang| translator.translate(&request.source_text, lang));
    let outcomes = join_all(calls).await;

    let result = match outcomes.into_iter().collect::<AppResult<Vec<String>>>() {
        Ok(translations) => TranslationResult::Success(translations),
        Err(e) => TranslationResult::Failure(e.to_string()),
    };
    Completion { request, result }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Translator;
    use crate::shared::error::{AppError, AppResult};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Answers `"{text}-{lang}"` after a per-text delay (50ms by default).
    #[derive(Default)]
    pub struct FakeTranslator {
        delays: Mutex<HashMap<String, Duration>>,
        failing: Mutex<HashSet<(String, String)>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeTranslator {
        pub fn delay(&self, text: &str, delay: Duration) {
            self.delays.lock().unwrap().insert(text.to_string(), delay);
        }

        pub fn fail(&self, text: &str, lang: &str) {
            self.failing
                .lock()
                .unwrap()
                .insert((text.to_string(), lang.to_string()));
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for FakeTranslator {
        async fn translate(&self, text: &str, target_lang: &str) -> AppResult<String> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), target_lang.to_string()));
            let delay = self
                .delays
                .lock()
                .unwrap()
                .get(text)
                .copied()
                .unwrap_or(Duration::from_millis(50));
            tokio::time::sleep(delay).await;

            let key = (text.to_string(), target_lang.to_string());
            if self.failing.lock().unwrap().contains(&key) {
                return Err(AppError::Network("connection reset".to_string()));
            }
            Ok(format!("{}-{}", text, target_lang))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeTranslator;
    use super::*;
    use crate::shared::emit::testing::RecordingSink;
    use tokio::time::sleep;

    fn start() -> (DispatcherHandle, Arc<FakeTranslator>, Arc<RecordingSink>) {
        let translator = Arc::new(FakeTranslator::default());
        let sink = RecordingSink::new();
        let config = DispatcherConfig {
            debounce: Duration::from_millis(300),
            target_languages: vec!["en".to_string(), "tr".to_string()],
        };
        let (dispatcher, handle) = TranslationDispatcher::new(translator.clone(), sink.clone(), config);
        tokio::spawn(dispatcher.run());
        (handle, translator, sink)
    }

    fn calls(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(text, lang)| (text.to_string(), lang.to_string()))
            .collect()
    }

    fn updated(items: &[&str]) -> AppEvent {
        AppEvent::TranslationsUpdated(items.iter().map(|s| s.to_string()).collect())
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_edits_issue_one_request() {
        let (handle, translator, sink) = start();

        for text in ["h", "he", "hel", "hell", "hello"] {
            handle.submit_text(text);
            sleep(Duration::from_millis(100)).await;
        }
        sleep(Duration::from_secs(1)).await;

        assert_eq!(translator.calls(), calls(&[("hello", "en"), ("hello", "tr")]));
        assert_eq!(sink.events(), vec![updated(&["hello-en", "hello-tr"])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_is_sent_before_settle() {
        let (handle, translator, _sink) = start();

        handle.submit_text("hello");
        sleep(Duration::from_millis(299)).await;
        assert!(translator.calls().is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(translator.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_text_is_normalized() {
        let (handle, translator, _sink) = start();

        handle.submit_text("  hello \n\t world  ");
        sleep(Duration::from_secs(1)).await;

        assert_eq!(translator.calls(), calls(&[("hello world", "en"), ("hello world", "tr")]));
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_clears_without_network() {
        let (handle, translator, sink) = start();

        handle.submit_text("hello");
        sleep(Duration::from_secs(1)).await;
        handle.submit_text(" \n ");
        sleep(Duration::from_secs(1)).await;

        assert_eq!(translator.calls().len(), 2);
        assert_eq!(
            sink.events(),
            vec![updated(&["hello-en", "hello-tr"]), AppEvent::TranslationsCleared]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_result_still_in_flight() {
        let (handle, translator, sink) = start();
        translator.delay("slow", Duration::from_millis(800));

        handle.submit_text("slow");
        sleep(Duration::from_millis(400)).await;
        handle.submit_text("");
        sleep(Duration::from_secs(2)).await;

        assert_eq!(sink.events(), vec![AppEvent::TranslationsCleared]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_result_is_not_overwritten_by_older() {
        let (handle, translator, sink) = start();
        translator.delay("first", Duration::from_millis(800));
        translator.delay("second", Duration::from_millis(50));

        // "first" goes out at 300ms and lands at 1100ms, after "second" (700ms -> 750ms).
        handle.submit_text("first");
        sleep(Duration::from_millis(400)).await;
        handle.submit_text("second");
        sleep(Duration::from_secs(2)).await;

        assert_eq!(translator.calls().len(), 4);
        assert_eq!(sink.events(), vec![updated(&["second-en", "second-tr"])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_older_result_arriving_first_is_discarded() {
        let (handle, translator, sink) = start();
        translator.delay("first", Duration::from_millis(600));
        translator.delay("second", Duration::from_millis(600));

        // "first" lands at 900ms, after "second" was issued at 700ms.
        handle.submit_text("first");
        sleep(Duration::from_millis(400)).await;
        handle.submit_text("second");
        sleep(Duration::from_millis(600)).await;
        assert!(sink.events().is_empty());

        sleep(Duration::from_secs(1)).await;
        assert_eq!(sink.events(), vec![updated(&["second-en", "second-tr"])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_keeps_previous_translations() {
        let (handle, translator, sink) = start();
        translator.fail("broken", "tr");

        handle.submit_text("hello");
        sleep(Duration::from_secs(1)).await;
        handle.submit_text("broken");
        sleep(Duration::from_secs(1)).await;

        // Both calls still ran; the request failed as a whole.
        assert_eq!(translator.calls().len(), 4);
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], updated(&["hello-en", "hello-tr"]));
        assert!(matches!(&events[1], AppEvent::TranslationFailed(reason) if reason.contains("connection reset")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unchanged_text_is_not_re_requested() {
        let (handle, translator, _sink) = start();

        handle.submit_text("hello");
        sleep(Duration::from_secs(1)).await;
        handle.submit_text("hello ");
        sleep(Duration::from_secs(1)).await;

        assert_eq!(translator.calls().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_text_is_retried() {
        let (handle, translator, sink) = start();
        translator.fail("flaky", "en");

        handle.submit_text("flaky");
        sleep(Duration::from_secs(1)).await;
        handle.submit_text("flaky");
        sleep(Duration::from_secs(1)).await;

        assert_eq!(translator.calls().len(), 4);
        assert_eq!(sink.events().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_target_change_retranslates_in_slot_order() {
        let (handle, translator, sink) = start();

        handle.submit_text("hello");
        sleep(Duration::from_secs(1)).await;
        handle.set_target_language(1, "de");
        sleep(Duration::from_secs(1)).await;
        handle.set_target_language(7, "fr");
        sleep(Duration::from_secs(1)).await;

        assert_eq!(
            translator.calls(),
            calls(&[("hello", "en"), ("hello", "tr"), ("hello", "en"), ("hello", "de")])
        );
        assert_eq!(
            sink.events(),
            vec![updated(&["hello-en", "hello-tr"]), updated(&["hello-en", "hello-de"])]
        );
    }
}
