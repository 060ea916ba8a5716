//! Clipboard pipeline
//!
//! Single task that owns the clipboard watcher and the window presenter. It
//! polls the clipboard on a fixed cadence, forwards new text to the
//! translation dispatcher and runs the always-on-top reversion when due.
//! Window-related commands from the UI or the global shortcut are funnelled
//! through the same loop so the presenter never needs a lock.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};

use super::clipboard::ClipboardWatcher;
use super::features::translator::DispatcherHandle;
use super::text::normalize_whitespace;
use super::window::WindowPresenter;
use crate::shared::emit::EventSink;
use crate::shared::error::{AppError, AppResult};
use crate::shared::events::AppEvent;

#[derive(Debug)]
pub enum PipelineCommand {
    /// Bring the window forward now, ignoring the attention cooldown.
    Present,
    TogglePinned(oneshot::Sender<AppResult<bool>>),
    Shutdown,
}

#[derive(Clone)]
pub struct PipelineHandle {
    tx: mpsc::UnboundedSender<PipelineCommand>,
}

impl PipelineHandle {
    pub fn present(&self) -> AppResult<()> {
        self.send(PipelineCommand::Present)
    }

    /// Flips the user's always-on-top choice and returns the new value.
    pub async fn toggle_pinned(&self) -> AppResult<bool> {
        let (reply, rx) = oneshot::channel();
        self.send(PipelineCommand::TogglePinned(reply))?;
        rx.await
            .map_err(|_| AppError::Window("Pipeline dropped the request".to_string()))?
    }

    pub fn shutdown(&self) {
        let _ = self.tx.send(PipelineCommand::Shutdown);
    }

    fn send(&self, command: PipelineCommand) -> AppResult<()> {
        self.tx
            .send(command)
            .map_err(|_| AppError::Window("Clipboard pipeline is not running".to_string()))
    }
}

pub struct ClipboardPipeline {
    watcher: ClipboardWatcher,
    presenter: WindowPresenter,
    dispatcher: DispatcherHandle,
    sink: Arc<dyn EventSink>,
    poll_interval: Duration,
    commands: mpsc::UnboundedReceiver<PipelineCommand>,
}

impl ClipboardPipeline {
    pub fn new(
        watcher: ClipboardWatcher,
        presenter: WindowPresenter,
        dispatcher: DispatcherHandle,
        sink: Arc<dyn EventSink>,
        poll_interval: Duration,
    ) -> (Self, PipelineHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let pipeline = Self {
            watcher,
            presenter,
            dispatcher,
            sink,
            poll_interval,
            commands,
        };
        (pipeline, PipelineHandle { tx })
    }

    pub async fn run(mut self) {
        log::info!(
            "[ClipboardPipeline] Polling clipboard every {}ms",
            self.poll_interval.as_millis()
        );

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let revert_at = self.presenter.revert_deadline();
            tokio::select! {
                tick = ticker.tick() => self.on_tick(tick),
                _ = sleep_until(revert_at.unwrap_or_else(Instant::now)), if revert_at.is_some() => {
                    self.presenter.revert_if_due(Instant::now());
                }
                command = self.commands.recv() => match command {
                    Some(PipelineCommand::Shutdown) | None => break,
                    Some(command) => self.on_command(command),
                },
            }
        }

        log::info!("[ClipboardPipeline] Stopped");
    }

    fn on_tick(&mut self, now: Instant) {
        let Some(change) = self.watcher.poll(now) else {
            return;
        };

        let text = normalize_whitespace(&change.text);
        self.sink.emit(AppEvent::SourceTextChanged(text.clone()));
        self.dispatcher.submit_text(text);

        if change.present {
            self.presenter.present(now);
        }
    }

    fn on_command(&mut self, command: PipelineCommand) {
        match command {
            PipelineCommand::Present => self.presenter.present(Instant::now()),
            PipelineCommand::TogglePinned(reply) => {
                let _ = reply.send(self.presenter.toggle_pinned());
            }
            PipelineCommand::Shutdown => {}
        }
    }
}
