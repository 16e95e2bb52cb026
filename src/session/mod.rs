//! Live translation session management
//!
//! This module provides the single-session core:
//! - `SessionState` - the one mutex-guarded aggregate of session state
//! - `ResultChannel` - FIFO handoff of finalized translations to pollers
//! - `SessionController` - exactly-once start, cooperative stop, polling

mod controller;
mod results;
mod state;

pub use controller::{SessionController, StartOutcome};
pub use results::ResultChannel;
pub use state::{SessionState, TranslationSnapshot};
