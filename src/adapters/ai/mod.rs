//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Configurable mock for testing
//! - `OpenAIProvider` - Any OpenAI-compatible chat-completions endpoint
//! - `RetryPolicy` - Timeout-only retry shared by real providers

mod mock_provider;
mod openai_provider;
mod retry;

pub use mock_provider::{MockAIProvider, MockError, MockResponse};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
pub use retry::RetryPolicy;
