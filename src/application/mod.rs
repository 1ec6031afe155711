//! Application layer - Handlers and session bookkeeping.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
mod session_registry;

pub use handlers::{StageController, StatelessTutor};
pub use session_registry::{SessionRegistry, SharedController, SharedStatelessTutor};
