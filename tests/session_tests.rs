// Integration tests for the session lifecycle and result-streaming core
//
// These drive SessionController through feed-backed sources, pushing raw
// recognition events the way an external platform's delivery thread would.

use anyhow::Result;
use speech_translator::{
    FeedHandle, FeedSource, LanguagePair, SessionController, SourceFactory, StartOutcome,
    TranslationSnapshot, TranslationSource,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Factory that records the handle of every source it creates so tests can
/// feed recognition events into the live session.
struct FeedFactory {
    handles: Mutex<Vec<FeedHandle>>,
}

impl FeedFactory {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            handles: Mutex::new(Vec::new()),
        })
    }

    fn sources_created(&self) -> usize {
        self.handles.lock().unwrap().len()
    }
}

impl SourceFactory for FeedFactory {
    fn create(&self, languages: &LanguagePair) -> Result<Box<dyn TranslationSource>> {
        let source = FeedSource::new(languages.clone());
        self.handles.lock().unwrap().push(source.handle());
        Ok(Box::new(source))
    }
}

/// Factory whose sources always fail to come up
struct FailingFactory;

impl SourceFactory for FailingFactory {
    fn create(&self, _languages: &LanguagePair) -> Result<Box<dyn TranslationSource>> {
        anyhow::bail!("platform rejected the subscription key")
    }
}

fn controller_with_feed() -> (SessionController, Arc<FeedFactory>) {
    let factory = FeedFactory::new();
    let controller = SessionController::new(factory.clone(), Duration::from_secs(1));
    (controller, factory)
}

/// Wait for the pump to create its source and return the feed handle
async fn feed_handle(factory: &FeedFactory) -> FeedHandle {
    for _ in 0..200 {
        if let Some(handle) = factory.handles.lock().unwrap().last().cloned() {
            return handle;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("translation source was never created");
}

/// Poll until the snapshot satisfies the predicate. Safe to call repeatedly:
/// polling an empty channel mutates nothing.
async fn poll_until(
    controller: &SessionController,
    pred: impl Fn(&TranslationSnapshot) -> bool,
) -> TranslationSnapshot {
    for _ in 0..200 {
        let snapshot = controller.poll().await;
        if pred(&snapshot) {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("snapshot never reached the expected state");
}

/// Give queued events time to travel feed -> source -> pump -> channel
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn double_start_never_spawns_a_second_producer() {
    let (controller, factory) = controller_with_feed();

    assert_eq!(
        controller.start("en-US", "fr").await,
        StartOutcome::Started
    );
    feed_handle(&factory).await;

    assert_eq!(
        controller.start("en-US", "fr").await,
        StartOutcome::AlreadyRecording
    );
    assert_eq!(
        controller.start("de-DE", "es").await,
        StartOutcome::AlreadyRecording
    );

    settle().await;
    assert_eq!(factory.sources_created(), 1);
}

#[tokio::test]
async fn partial_then_final_scenario() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognizing("fr", "Bonj");
    let snapshot = poll_until(&controller, |s| s.partial == "Bonj").await;
    assert!(snapshot.history.is_empty());

    handle.recognized("fr", "Bonjour");
    let snapshot = poll_until(&controller, |s| !s.history.is_empty()).await;
    assert_eq!(snapshot.history, vec!["Bonjour"]);
    assert_eq!(snapshot.partial, "");

    // Nothing new: a further poll returns the identical snapshot
    let again = controller.poll().await;
    assert_eq!(again.history, vec!["Bonjour"]);
    assert_eq!(again.partial, "");
}

#[tokio::test]
async fn poll_on_empty_channel_mutates_nothing() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognizing("fr", "Bonj");
    poll_until(&controller, |s| s.partial == "Bonj").await;

    for _ in 0..5 {
        let snapshot = controller.poll().await;
        assert!(snapshot.history.is_empty());
        assert_eq!(snapshot.partial, "Bonj");
    }
}

#[tokio::test]
async fn poll_drains_exactly_one_result_per_call() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognized("fr", "Bonjour");
    handle.recognized("fr", "Bonsoir");
    settle().await;

    let first = controller.poll().await;
    assert_eq!(first.history, vec!["Bonjour"]);

    let second = controller.poll().await;
    assert_eq!(second.history, vec!["Bonjour", "Bonsoir"]);
}

#[tokio::test]
async fn partial_is_last_value_wins() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognizing("fr", "Bon");
    handle.recognizing("fr", "Bonjour le");
    poll_until(&controller, |s| s.partial == "Bonjour le").await;
}

#[tokio::test]
async fn whitespace_only_final_is_not_enqueued() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognized("fr", "   ");
    settle().await;

    let snapshot = controller.poll().await;
    assert!(snapshot.history.is_empty());

    // A real result after the blank one still comes through, trimmed
    handle.recognized("fr", "  Bonjour  ");
    let snapshot = poll_until(&controller, |s| !s.history.is_empty()).await;
    assert_eq!(snapshot.history, vec!["Bonjour"]);
}

#[tokio::test]
async fn final_without_target_language_is_skipped() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    // Translated into the wrong language only: no placeholder is fabricated
    handle.recognized("de", "Guten Tag");
    settle().await;
    assert!(controller.poll().await.history.is_empty());

    handle.recognized("fr", "Bonjour");
    let snapshot = poll_until(&controller, |s| !s.history.is_empty()).await;
    assert_eq!(snapshot.history, vec!["Bonjour"]);
}

#[tokio::test]
async fn stop_is_idempotent_and_start_is_accepted_again() {
    let (controller, factory) = controller_with_feed();

    // Stop with nothing running is a legal no-op
    controller.stop().await;
    assert!(!controller.is_active().await);

    controller.start("en-US", "fr").await;
    feed_handle(&factory).await;
    assert!(controller.is_active().await);

    controller.stop().await;
    controller.stop().await;
    assert!(!controller.is_active().await);

    assert_eq!(
        controller.start("en-US", "fr").await,
        StartOutcome::Started
    );
    for _ in 0..200 {
        if factory.sources_created() == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(factory.sources_created(), 2);
}

#[tokio::test]
async fn history_persists_across_stop_start_cycles() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognized("fr", "Bonjour");
    poll_until(&controller, |s| !s.history.is_empty()).await;

    controller.stop().await;
    controller.start("en-US", "fr").await;

    let snapshot = controller.poll().await;
    assert_eq!(snapshot.history, vec!["Bonjour"]);
}

#[tokio::test]
async fn results_queued_before_stop_still_surface() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognized("fr", "Bonjour");
    settle().await;
    controller.stop().await;

    let snapshot = controller.poll().await;
    assert_eq!(snapshot.history, vec!["Bonjour"]);
}

#[tokio::test]
async fn clear_resets_history_but_not_queued_results() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognized("fr", "Bonjour");
    poll_until(&controller, |s| !s.history.is_empty()).await;

    // One drained into history, one still queued
    handle.recognized("fr", "Bonsoir");
    settle().await;

    controller.clear().await;
    let snapshot = controller.poll().await;
    assert_eq!(snapshot.history, vec!["Bonsoir"]);
    assert_eq!(snapshot.partial, "");
}

#[tokio::test]
async fn clear_then_poll_with_empty_channel_is_empty() {
    let (controller, factory) = controller_with_feed();
    controller.start("en-US", "fr").await;
    let handle = feed_handle(&factory).await;

    handle.recognizing("fr", "Bonj");
    poll_until(&controller, |s| s.partial == "Bonj").await;

    controller.clear().await;
    let snapshot = controller.poll().await;
    assert!(snapshot.history.is_empty());
    assert_eq!(snapshot.partial, "");
}

#[tokio::test]
async fn producer_failure_leaves_session_inactive() {
    let controller = SessionController::new(Arc::new(FailingFactory), Duration::from_secs(1));

    assert_eq!(
        controller.start("en-US", "fr").await,
        StartOutcome::Started
    );

    // The pump fails to acquire its source and must not leave the session
    // stuck "recording"
    for _ in 0..200 {
        if !controller.is_active().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(!controller.is_active().await);

    // A client may re-issue start after the failure
    assert_eq!(
        controller.start("en-US", "fr").await,
        StartOutcome::Started
    );
}
