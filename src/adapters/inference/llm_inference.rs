//! InferenceService backed by a chat-completion provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::tutoring::{ChatMessage, IntentCatalog, Stage};
use crate::ports::{
    AIProvider, CompletionRequest, InferenceError, InferenceService, MessageRole, ReplyRequest,
    RequestMetadata,
};

use super::prompts;

/// Builds tutoring prompts and parses the provider's answers.
pub struct LlmInferenceService<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: AIProvider + ?Sized> LlmInferenceService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    async fn ask(&self, request: CompletionRequest) -> Result<String, InferenceError> {
        let response = self.provider.complete(request).await?;
        Ok(response.content)
    }
}

#[async_trait]
impl<P: AIProvider + ?Sized> InferenceService for LlmInferenceService<P> {
    async fn classify_intent(
        &self,
        catalog: &IntentCatalog,
        utterance: &str,
    ) -> Result<Vec<f64>, InferenceError> {
        let request = CompletionRequest::new(RequestMetadata::new("classify_intent"))
            .with_message(MessageRole::User, prompts::classification_prompt(catalog, utterance))
            .with_temperature(prompts::CLASSIFY_TEMPERATURE);

        let reply = self.ask(request).await?;
        let scores = prompts::extract_numbers(&reply);

        if scores.len() != catalog.len() {
            tracing::warn!(
                expected = catalog.len(),
                actual = scores.len(),
                reply = %reply,
                "Classifier returned the wrong number of scores"
            );
            return Err(InferenceError::malformed(format!(
                "expected {} scores, got {}",
                catalog.len(),
                scores.len()
            )));
        }

        Ok(scores)
    }

    async fn evaluate_transition(
        &self,
        history: &[ChatMessage],
        utterance: &str,
        stage: Stage,
    ) -> Result<String, InferenceError> {
        let question = prompts::readiness_question(stage, utterance).ok_or_else(|| {
            InferenceError::malformed(format!("stage {} has no readiness question", stage.label()))
        })?;

        let request = CompletionRequest::new(RequestMetadata::new("evaluate_transition"))
            .with_history(history)
            .with_message(MessageRole::User, question)
            .with_temperature(prompts::TRANSITION_TEMPERATURE)
            .with_max_tokens(prompts::TRANSITION_MAX_TOKENS);

        let verdict = self.ask(request).await?;
        Ok(verdict.trim().to_lowercase())
    }

    async fn compose_reply(&self, request: ReplyRequest<'_>) -> Result<String, InferenceError> {
        let profile = prompts::student_profile(request.catalog, request.polarity_gap);
        let prompt = prompts::reply_prompt(request.utterance, &profile, request.stage_notice);

        let completion = CompletionRequest::new(RequestMetadata::new("compose_reply"))
            .with_history(request.history)
            .with_message(MessageRole::User, prompt)
            .with_temperature(prompts::REPLY_TEMPERATURE)
            .with_max_tokens(prompts::REPLY_MAX_TOKENS);

        self.ask(completion).await
    }

    async fn generate(&self, history: &[ChatMessage]) -> Result<String, InferenceError> {
        let request = CompletionRequest::new(RequestMetadata::new("generate"))
            .with_history(history)
            .with_temperature(prompts::REPLY_TEMPERATURE)
            .with_max_tokens(prompts::REPLY_MAX_TOKENS);

        self.ask(request).await
    }
}
