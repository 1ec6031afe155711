//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the tutoring domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Raw chat-completion endpoint
//! - `InferenceService` - Intent classification, readiness checks and reply
//!   generation used by the stage controller

mod ai_provider;
mod inference_service;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, Message, MessageRole,
    RequestMetadata,
};
pub use inference_service::{InferenceError, InferenceService, ReplyRequest};
