//! InferenceService port - classification and generation for tutoring turns.
//!
//! The stage controller never talks to an LLM directly. It asks this port to
//! classify an utterance against a stage's intent catalog, to judge stage
//! readiness, and to compose the reply.

use async_trait::async_trait;

use crate::domain::tutoring::{ChatMessage, IntentCatalog, Stage};

use super::ai_provider::AIError;

/// Everything reply composition needs from the current turn.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRequest<'a> {
    pub utterance: &'a str,
    /// History before this turn's exchange is appended.
    pub history: &'a [ChatMessage],
    /// Catalog of the stage the reply is written for.
    pub catalog: &'a IntentCatalog,
    /// Per-axis `appraisal_state − feeling_state`.
    pub polarity_gap: &'a [f64],
    pub from_stage: Stage,
    pub to_stage: Stage,
    /// Narrative or generic stage notice to weave into the reply.
    pub stage_notice: &'a str,
}

/// Errors from the inference port.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    /// The underlying provider failed.
    #[error(transparent)]
    Provider(#[from] AIError),

    /// The provider answered but the answer could not be used.
    #[error("malformed inference response: {0}")]
    MalformedResponse(String),
}

impl InferenceError {
    /// Creates a malformed response error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse(reason.into())
    }
}

/// Classification and generation endpoint used by the tutoring application.
#[async_trait]
pub trait InferenceService: Send + Sync {
    /// Scores `utterance` against every catalog entry.
    ///
    /// Implementations return exactly `catalog.len()` values in coordinate
    /// order (`+1 … +k, −1 … −k`).
    async fn classify_intent(
        &self,
        catalog: &IntentCatalog,
        utterance: &str,
    ) -> Result<Vec<f64>, InferenceError>;

    /// Asks whether the dialogue is ready to leave `stage`.
    ///
    /// Returns the raw verdict text. Never called for the terminal stage.
    async fn evaluate_transition(
        &self,
        history: &[ChatMessage],
        utterance: &str,
        stage: Stage,
    ) -> Result<String, InferenceError>;

    /// Writes the tutor's reply for a staged turn.
    async fn compose_reply(&self, request: ReplyRequest<'_>) -> Result<String, InferenceError>;

    /// Continues a plain conversation without any affective context.
    async fn generate(&self, history: &[ChatMessage]) -> Result<String, InferenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_errors_convert_transparently() {
        let err: InferenceError = AIError::timeout(30).into();

        assert!(matches!(err, InferenceError::Provider(AIError::Timeout { timeout_secs: 30 })));
        assert_eq!(err.to_string(), "request timed out after 30s");
    }

    #[test]
    fn malformed_response_display() {
        let err = InferenceError::malformed("expected 6 scores, got 4");
        assert_eq!(
            err.to_string(),
            "malformed inference response: expected 6 scores, got 4"
        );
    }
}
