use super::event::{LanguagePair, TranslationEvent};
use super::source::{SourceFactory, TranslationSource};
use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

const SCRIPT: &[&str] = &[
    "Hello, welcome to the live translation demo.",
    "This sentence was produced by the scripted source.",
    "Plug a real speech platform into the feed source for live audio.",
];

/// Development source that replays a canned script as timed partial and
/// final events, standing in for a live recognizer.
pub struct ScriptedSource {
    languages: LanguagePair,
    task: Option<JoinHandle<()>>,
}

impl ScriptedSource {
    pub fn new(languages: LanguagePair) -> Self {
        Self {
            languages,
            task: None,
        }
    }
}

#[async_trait::async_trait]
impl TranslationSource for ScriptedSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<TranslationEvent>> {
        let (tx, rx) = mpsc::channel(16);
        let target = self.languages.target.clone();

        self.task = Some(tokio::spawn(async move {
            for line in SCRIPT.iter().cycle() {
                let line = format!("[{target}] {line}");
                let words: Vec<&str> = line.split_whitespace().collect();

                // Grow the utterance word by word, then finalize it
                for end in 1..words.len() {
                    let partial = words[..end].join(" ");
                    if tx.send(TranslationEvent::Partial(partial)).await.is_err() {
                        return;
                    }
                    tokio::time::sleep(Duration::from_millis(250)).await;
                }
                if tx.send(TranslationEvent::Final(line)).await.is_err() {
                    return;
                }
                tokio::time::sleep(Duration::from_secs(2)).await;
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
        "scripted"
    }
}

pub struct ScriptedSourceFactory;

impl SourceFactory for ScriptedSourceFactory {
    fn create(&self, languages: &LanguagePair) -> Result<Box<dyn TranslationSource>> {
        info!(
            "creating scripted source for {} -> {}",
            languages.source, languages.target
        );
        Ok(Box::new(ScriptedSource::new(languages.clone())))
    }
}
