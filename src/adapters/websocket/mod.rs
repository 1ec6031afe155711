//! WebSocket transport for tutoring sessions.
//!
//! # Components
//!
//! - [`messages`] - Chat and error frame types
//! - [`handler`] - Axum upgrade handlers, per-connection loop and router

pub mod handler;
pub mod messages;

pub use handler::{dummy_ws_handler, root, tutor_router, tutor_ws_handler, TutorState};
pub use messages::{ErrorFrame, TutorFrame};
