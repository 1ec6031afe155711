//! Tutoring domain - stages, intent catalogs, scripts and session state.
//!
//! # Module Organization
//!
//! - `stage` - the four forward-only pedagogical stages
//! - `catalog` - per-stage intent labels and profile relabeling
//! - `script` - immutable tutoring script shared by all sessions
//! - `session` - per-connection dialogue state
//! - `diagnostics` - per-turn snapshot of the affective model

mod catalog;
mod diagnostics;
mod errors;
mod script;
mod session;
mod stage;

pub use catalog::{IntentCatalog, NEUTRAL_BAND};
pub use diagnostics::TurnDiagnostics;
pub use errors::TutorError;
pub use script::{FallbackReplies, StageScript, TutorScript, DEFAULT_CONVERGENCE_THRESHOLD};
pub use session::{ChatMessage, ChatRole, DialogueSession};
pub use stage::Stage;
