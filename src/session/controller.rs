use super::results::ResultChannel;
use super::state::{SessionState, TranslationSnapshot};
use crate::translate::{LanguagePair, SourceFactory, TranslationEvent};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::{watch, Mutex};
use tracing::{error, info, warn};

/// Outcome of a start request. A double start is a defined outcome, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRecording,
}

/// Orchestrates the single live translation session
///
/// Owns the exactly-once start/stop lifecycle and the background pump task
/// that moves source events into the session state and result channel. All
/// foreground operations are non-blocking; only the pump does long-lived
/// work.
pub struct SessionController {
    factory: Arc<dyn SourceFactory>,
    state: Arc<Mutex<SessionState>>,
    results: ResultChannel,
    /// Stop signal for the live pump, installed and taken under `state`
    stop_tx: Mutex<Option<watch::Sender<bool>>>,
    /// How long a pump may spend tearing down its source before we abandon it
    stop_grace: Duration,
}

impl SessionController {
    pub fn new(factory: Arc<dyn SourceFactory>, stop_grace: Duration) -> Self {
        Self {
            factory,
            state: Arc::new(Mutex::new(SessionState::default())),
            results: ResultChannel::new(),
            stop_tx: Mutex::new(None),
            stop_grace,
        }
    }

    /// Start a recording session
    ///
    /// Reports `AlreadyRecording` while a session is live; repeated or
    /// concurrent starts never spawn a second pump task.
    pub async fn start(&self, source_lang: &str, target_lang: &str) -> StartOutcome {
        let languages = LanguagePair::new(source_lang, target_lang);

        let (generation, stop_rx) = {
            let mut state = self.state.lock().await;
            if state.active {
                warn!("start requested while already recording");
                return StartOutcome::AlreadyRecording;
            }

            let generation = state.begin(languages.clone());
            info!(
                "recording started: {} ({} -> {})",
                state.session_id, languages.source, languages.target
            );

            // Installed while still holding the state lock so a concurrent
            // stop cannot slip in between activation and signal setup
            let (stop_tx, stop_rx) = watch::channel(false);
            *self.stop_tx.lock().await = Some(stop_tx);

            (generation, stop_rx)
        };

        let factory = Arc::clone(&self.factory);
        let state = Arc::clone(&self.state);
        let results_tx = self.results.sender();
        let grace = self.stop_grace;

        tokio::spawn(async move {
            let outcome = pump(
                factory,
                languages,
                Arc::clone(&state),
                results_tx,
                stop_rx,
                grace,
            )
            .await;
            if let Err(e) = outcome {
                error!("translation source failed: {e:#}");
            }
            if let Some(elapsed) = state.lock().await.finish_generation(generation) {
                info!("session pump exited after {elapsed:.1}s");
            }
        });

        StartOutcome::Started
    }

    /// Stop the session
    ///
    /// Idempotent and non-blocking: signals the pump and returns without
    /// waiting for source teardown. A stop with nothing running is a no-op.
    pub async fn stop(&self) {
        let stop_tx = {
            let mut state = self.state.lock().await;
            if state.active {
                let elapsed = state.finish();
                info!("recording stopped after {elapsed:.1}s");
            } else {
                state.finish();
                warn!("stop requested with no active session");
            }
            self.stop_tx.lock().await.take()
        };

        if let Some(stop_tx) = stop_tx {
            let _ = stop_tx.send(true);
        }
    }

    /// Drain at most one finalized result into history and return the
    /// current snapshot
    ///
    /// Non-blocking; an empty channel leaves history and partial untouched.
    /// Draining a result retires the partial text that preceded it.
    pub async fn poll(&self) -> TranslationSnapshot {
        let drained = self.results.try_drain_one().await;

        let mut state = self.state.lock().await;
        if let Some(text) = drained {
            state.history.push(text);
            state.current_partial.clear();
        }
        state.snapshot()
    }

    /// Reset history and partial text
    ///
    /// Queued results that were never drained still surface on later polls.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.history.clear();
        state.current_partial.clear();
        info!("translation history cleared");
    }

    pub async fn is_active(&self) -> bool {
        self.state.lock().await.active
    }
}

/// Drive one source until stopped or failed, publishing partials into the
/// session state and finals into the result channel.
async fn pump(
    factory: Arc<dyn SourceFactory>,
    languages: LanguagePair,
    state: Arc<Mutex<SessionState>>,
    results_tx: UnboundedSender<String>,
    mut stop_rx: watch::Receiver<bool>,
    grace: Duration,
) -> Result<()> {
    let mut source = factory
        .create(&languages)
        .context("failed to create translation source")?;
    let mut events = source
        .start()
        .await
        .context("failed to start translation source")?;
    info!("streaming from {} source", source.name());

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(TranslationEvent::Final(text)) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        // Receiver lives for the whole process
                        let _ = results_tx.send(text.to_string());
                    }
                }
                Some(TranslationEvent::Partial(text)) => {
                    let text = text.trim();
                    if !text.is_empty() {
                        state.lock().await.current_partial = text.to_string();
                    }
                }
                None => {
                    warn!("translation source ended its event stream");
                    break;
                }
            },
            _ = stop_rx.changed() => break,
        }
    }

    match tokio::time::timeout(grace, source.stop()).await {
        Ok(stopped) => stopped.context("failed to stop translation source")?,
        Err(_) => warn!("source did not stop within {grace:?}; abandoning it"),
    }

    Ok(())
}
