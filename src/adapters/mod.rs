//! Adapters - Implementations of ports and the network transport.
//!
//! - `ai` - Chat-completion providers (OpenAI-compatible, mock)
//! - `inference` - InferenceService over an AI provider, plus a mock
//! - `websocket` - Axum websocket routes for tutoring sessions

pub mod ai;
pub mod inference;
pub mod websocket;
