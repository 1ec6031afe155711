//! Application handlers.
//!
//! Handlers that orchestrate domain operations over the ports.

pub mod tutoring;

pub use tutoring::{StageController, StatelessTutor};
