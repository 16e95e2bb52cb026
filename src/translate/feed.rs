use super::event::{LanguagePair, RecognitionEvent, RecognitionKind, TranslationEvent};
use super::source::TranslationSource;
use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Adapter seam for an external speech platform
///
/// The platform's own delivery thread pushes raw [`RecognitionEvent`]s
/// through a [`FeedHandle`]; the source resolves the session's target
/// language and forwards abstract [`TranslationEvent`]s to the session pump.
/// A final event with no translation for the target language is skipped
/// rather than replaced with placeholder text.
pub struct FeedSource {
    languages: LanguagePair,
    ingress_tx: mpsc::UnboundedSender<RecognitionEvent>,
    ingress_rx: Option<mpsc::UnboundedReceiver<RecognitionEvent>>,
    task: Option<JoinHandle<()>>,
}

impl FeedSource {
    pub fn new(languages: LanguagePair) -> Self {
        let (ingress_tx, ingress_rx) = mpsc::unbounded_channel();
        Self {
            languages,
            ingress_tx,
            ingress_rx: Some(ingress_rx),
            task: None,
        }
    }

    /// Handle for the platform's delivery thread. May be cloned freely and
    /// used from non-async contexts.
    pub fn handle(&self) -> FeedHandle {
        FeedHandle {
            tx: self.ingress_tx.clone(),
        }
    }
}

#[async_trait::async_trait]
impl TranslationSource for FeedSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<TranslationEvent>> {
        let mut ingress_rx = self
            .ingress_rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("feed source already started"))?;
        let target = self.languages.target.clone();
        let (tx, rx) = mpsc::channel(64);

        self.task = Some(tokio::spawn(async move {
            while let Some(event) = ingress_rx.recv().await {
                let Some(mapped) = map_event(event, &target) else {
                    continue;
                };
                if tx.send(mapped).await.is_err() {
                    break;
                }
            }
        }));

        Ok(rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "feed"
    }
}

/// Resolve the target-language text out of a raw event. Events that carry no
/// translation for the target are absent results, not errors.
fn map_event(event: RecognitionEvent, target_lang: &str) -> Option<TranslationEvent> {
    let text = event.translations.get(target_lang)?.clone();
    match event.kind {
        RecognitionKind::Recognizing => Some(TranslationEvent::Partial(text)),
        RecognitionKind::Recognized => Some(TranslationEvent::Final(text)),
    }
}

/// Ingress handle held by the external platform binding
#[derive(Clone)]
pub struct FeedHandle {
    tx: mpsc::UnboundedSender<RecognitionEvent>,
}

impl FeedHandle {
    /// Push a raw event. Returns false once the source is gone.
    pub fn push(&self, event: RecognitionEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Push an interim hypothesis for a single language
    pub fn recognizing(&self, lang: &str, text: &str) -> bool {
        self.push(RecognitionEvent::partial(lang, text))
    }

    /// Push a finalized utterance for a single language
    pub fn recognized(&self, lang: &str, text: &str) -> bool {
        self.push(RecognitionEvent::finalized(lang, text))
    }
}
