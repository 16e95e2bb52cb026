//! Boundary to the external streaming speech-translation platform
//!
//! This module abstracts the recognizer as a generic streaming source:
//! - `TranslationSource` / `SourceFactory` - start/stop contract for a
//!   lazy, non-restartable stream of translation events
//! - `FeedSource` - adapter seam for a platform SDK's delivery thread
//! - `ScriptedSource` - canned event stream for local development

mod event;
mod feed;
mod scripted;
mod source;

pub use event::{LanguagePair, RecognitionEvent, RecognitionKind, TranslationEvent};
pub use feed::{FeedHandle, FeedSource};
pub use scripted::{ScriptedSource, ScriptedSourceFactory};
pub use source::{SourceFactory, TranslationSource};
