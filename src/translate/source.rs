use super::event::{LanguagePair, TranslationEvent};
use anyhow::Result;
use tokio::sync::mpsc;

/// Streaming translation source
///
/// A source is lazy and non-restartable: `start` may be called once and the
/// stream runs until `stop` or until the source ends it itself (the session
/// pump treats a closed stream as a producer failure).
#[async_trait::async_trait]
pub trait TranslationSource: Send + Sync {
    /// Begin streaming
    ///
    /// Returns a channel receiver that will receive translation events
    async fn start(&mut self) -> Result<mpsc::Receiver<TranslationEvent>>;

    /// Stop streaming
    ///
    /// Safe to call even if the source already stopped itself.
    async fn stop(&mut self) -> Result<()>;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// Creates a fresh source for each recording session
pub trait SourceFactory: Send + Sync {
    fn create(&self, languages: &LanguagePair) -> Result<Box<dyn TranslationSource>>;
}
