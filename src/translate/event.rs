use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Source/target language pair for one recording session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    /// Spoken language to recognize (e.g. "en-US")
    pub source: String,
    /// Language to translate into (e.g. "fr")
    pub target: String,
}

impl LanguagePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Event emitted by a translation source
///
/// Consumed immediately by the session pump, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationEvent {
    /// In-progress fragment, superseded by later partials or a final
    Partial(String),
    /// Completed, stable translation of one utterance
    Final(String),
}

/// Recognition phase of a raw platform event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionKind {
    /// Interim hypothesis, still being revised
    Recognizing,
    /// Stable result for a completed utterance
    Recognized,
}

/// Raw event as delivered by the external platform: a recognition phase plus
/// whatever translations it produced, keyed by target language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionEvent {
    pub kind: RecognitionKind,
    pub translations: HashMap<String, String>,
}

impl RecognitionEvent {
    /// Interim event carrying a single translation
    pub fn partial(lang: &str, text: &str) -> Self {
        Self {
            kind: RecognitionKind::Recognizing,
            translations: HashMap::from([(lang.to_string(), text.to_string())]),
        }
    }

    /// Finalized event carrying a single translation
    pub fn finalized(lang: &str, text: &str) -> Self {
        Self {
            kind: RecognitionKind::Recognized,
            translations: HashMap::from([(lang.to_string(), text.to_string())]),
        }
    }
}
