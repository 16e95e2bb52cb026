pub mod config;
pub mod http;
pub mod session;
pub mod translate;

pub use config::Config;
pub use http::{create_router, AppState};
pub use session::{
    ResultChannel, SessionController, SessionState, StartOutcome, TranslationSnapshot,
};
pub use translate::{
    FeedHandle, FeedSource, LanguagePair, RecognitionEvent, RecognitionKind, ScriptedSource,
    ScriptedSourceFactory, SourceFactory, TranslationEvent, TranslationSource,
};
