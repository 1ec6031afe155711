//! StatelessTutor - reply-only tutoring without affect or stages.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::tutoring::{ChatMessage, TutorScript};
use crate::ports::InferenceService;

/// Plain conversational tutor seeded with the script's system prompt.
pub struct StatelessTutor {
    session_id: SessionId,
    script: Arc<TutorScript>,
    inference: Arc<dyn InferenceService>,
    history: Vec<ChatMessage>,
}

impl StatelessTutor {
    pub fn new(
        session_id: SessionId,
        script: Arc<TutorScript>,
        inference: Arc<dyn InferenceService>,
    ) -> Self {
        let history = vec![ChatMessage::system(script.stateless_system_prompt())];
        Self {
            session_id,
            script,
            inference,
            history,
        }
    }

    /// Appends the utterance and generates a reply from the whole history.
    ///
    /// Only user utterances are recorded: neither the reply nor the fallback
    /// text sent on a failed generation is added to the history.
    pub async fn handle_turn(&mut self, utterance: &str) -> String {
        self.history.push(ChatMessage::user(utterance));

        let generated = self.inference.generate(&self.history).await;
        match generated {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    error = %err,
                    "Stateless generation failed, sending fallback"
                );
                self.script.fallbacks().stateless_failed.clone()
            }
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockError;
    use crate::adapters::inference::{InferenceCall, MockInferenceService};
    use crate::domain::tutoring::{FallbackReplies, IntentCatalog, StageScript};

    fn script() -> Arc<TutorScript> {
        let stage = || {
            StageScript::new(IntentCatalog::from_axes([("curious", "indifferent")]).unwrap())
        };
        Arc::new(
            TutorScript::new(
                [stage(), stage(), stage(), stage()],
                "Hello!",
                "You are a friendly essay tutor.",
                vec!["yes".to_string()],
                FallbackReplies::default(),
            )
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn successful_turn_records_only_the_utterance() {
        let mock = MockInferenceService::new()
            .with_generation("Hi, what shall we write about?")
            .with_generation("Tell me more.");
        let mut tutor = StatelessTutor::new(SessionId::new(), script(), Arc::new(mock.clone()));

        let reply = tutor.handle_turn("hello").await;
        tutor.handle_turn("the sea").await;

        assert_eq!(reply, "Hi, what shall we write about?");
        assert_eq!(
            tutor.history(),
            &[
                ChatMessage::system("You are a friendly essay tutor."),
                ChatMessage::user("hello"),
                ChatMessage::user("the sea"),
            ]
        );
        assert_eq!(
            mock.calls(),
            vec![
                InferenceCall::Generate { history_len: 2 },
                InferenceCall::Generate { history_len: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn failed_turn_returns_fallback_and_keeps_only_the_utterance() {
        let mock = MockInferenceService::new().with_generation_error(MockError::Network {
            message: "refused".into(),
        });
        let mut tutor = StatelessTutor::new(SessionId::new(), script(), Arc::new(mock));

        let reply = tutor.handle_turn("hello").await;

        assert_eq!(reply, FallbackReplies::default().stateless_failed);
        assert_eq!(tutor.history().len(), 2);
        assert_eq!(tutor.history()[1], ChatMessage::user("hello"));
    }
}
