use crate::translate::LanguagePair;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Mutable state of the single live session
///
/// Every field is read and written under the controller's mutex; nothing
/// here is shared unguarded.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Whether a pump task is being driven against a source
    pub active: bool,

    /// Language pair of the active session, cleared on stop
    pub languages: Option<LanguagePair>,

    /// Identifier of the current or most recent session
    pub session_id: String,

    /// When the current session started
    pub started_at: Option<DateTime<Utc>>,

    /// Latest in-progress translation; overwritten, never appended
    pub current_partial: String,

    /// Finalized translations, insertion order = completion order.
    /// Persists across stop/start cycles until an explicit clear.
    pub history: Vec<String>,

    /// Bumped on every start so a stale pump cannot retire a newer session
    generation: u64,
}

impl SessionState {
    /// Mark the session active for `languages`; returns the generation the
    /// new pump task should retire when it exits.
    pub fn begin(&mut self, languages: LanguagePair) -> u64 {
        self.active = true;
        self.languages = Some(languages);
        self.session_id = format!("session-{}", Uuid::new_v4());
        self.started_at = Some(Utc::now());
        self.generation += 1;
        self.generation
    }

    /// Mark the session inactive; returns elapsed seconds for logging
    pub fn finish(&mut self) -> f64 {
        self.active = false;
        self.languages = None;
        self.started_at
            .map(|t| Utc::now().signed_duration_since(t).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0)
    }

    /// Retire the session only if `generation` is still current
    ///
    /// A pump unwinding after a stop/start cycle must not clobber the
    /// session started after it.
    pub fn finish_generation(&mut self, generation: u64) -> Option<f64> {
        if self.generation == generation {
            Some(self.finish())
        } else {
            None
        }
    }

    pub fn snapshot(&self) -> TranslationSnapshot {
        TranslationSnapshot {
            history: self.history.clone(),
            partial: self.current_partial.clone(),
        }
    }
}

/// What polling clients see: full history plus the current partial
#[derive(Debug, Clone, Serialize)]
pub struct TranslationSnapshot {
    pub history: Vec<String>,
    pub partial: String,
}
