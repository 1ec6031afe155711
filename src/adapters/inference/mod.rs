//! Inference Adapters.
//!
//! Implementations of the InferenceService port.
//!
//! - `LlmInferenceService` - prompts any `AIProvider` and parses its answers
//! - `MockInferenceService` - scripted outcomes with call recording

mod llm_inference;
mod mock_inference;
pub mod prompts;

pub use llm_inference::LlmInferenceService;
pub use mock_inference::{InferenceCall, MockInferenceService, DEFAULT_MOCK_REPLY};
