//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers that the tutoring and transport layers share.

mod ids;

pub use ids::SessionId;
