//! Mock InferenceService for controller and transport tests.
//!
//! Each operation has its own queue of scripted outcomes. When a queue runs
//! dry the mock falls back to a neutral default: all-zero scores, a "no"
//! verdict and a fixed reply. Every call is recorded.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::adapters::ai::MockError;
use crate::domain::tutoring::{ChatMessage, IntentCatalog, Stage};
use crate::ports::{AIError, InferenceError, InferenceService, ReplyRequest};

/// Reply returned once the reply queues are exhausted.
pub const DEFAULT_MOCK_REPLY: &str = "Mock reply";

/// A recorded call to the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceCall {
    ClassifyIntent {
        labels: Vec<String>,
        utterance: String,
    },
    EvaluateTransition {
        stage: Stage,
        utterance: String,
        history_len: usize,
    },
    ComposeReply {
        utterance: String,
        labels: Vec<String>,
        polarity_gap: Vec<f64>,
        from_stage: Stage,
        to_stage: Stage,
        stage_notice: String,
        history_len: usize,
    },
    Generate {
        history_len: usize,
    },
}

#[derive(Debug, Default)]
struct Script {
    scores: VecDeque<Result<Vec<f64>, MockError>>,
    verdicts: VecDeque<Result<String, MockError>>,
    replies: VecDeque<Result<String, MockError>>,
    generations: VecDeque<Result<String, MockError>>,
}

/// Scripted inference service.
#[derive(Debug, Clone, Default)]
pub struct MockInferenceService {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<InferenceCall>>>,
}

fn failure(error: MockError) -> InferenceError {
    InferenceError::Provider(AIError::from(error))
}

impl MockInferenceService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a classification result.
    pub fn with_scores(self, scores: Vec<f64>) -> Self {
        self.script.lock().unwrap().scores.push_back(Ok(scores));
        self
    }

    /// Queues a classification failure.
    pub fn with_classification_error(self, error: MockError) -> Self {
        self.script.lock().unwrap().scores.push_back(Err(error));
        self
    }

    /// Queues a readiness verdict.
    pub fn with_verdict(self, verdict: impl Into<String>) -> Self {
        self.script.lock().unwrap().verdicts.push_back(Ok(verdict.into()));
        self
    }

    /// Queues a readiness check failure.
    pub fn with_transition_error(self, error: MockError) -> Self {
        self.script.lock().unwrap().verdicts.push_back(Err(error));
        self
    }

    /// Queues a staged reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.script.lock().unwrap().replies.push_back(Ok(reply.into()));
        self
    }

    /// Queues a staged reply failure.
    pub fn with_reply_error(self, error: MockError) -> Self {
        self.script.lock().unwrap().replies.push_back(Err(error));
        self
    }

    /// Queues a stateless generation.
    pub fn with_generation(self, reply: impl Into<String>) -> Self {
        self.script.lock().unwrap().generations.push_back(Ok(reply.into()));
        self
    }

    /// Queues a stateless generation failure.
    pub fn with_generation_error(self, error: MockError) -> Self {
        self.script.lock().unwrap().generations.push_back(Err(error));
        self
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> Vec<InferenceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Stages passed to `evaluate_transition`, oldest first.
    pub fn evaluated_stages(&self) -> Vec<Stage> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InferenceCall::EvaluateTransition { stage, .. } => Some(stage),
                _ => None,
            })
            .collect()
    }

    /// Stage notices passed to `compose_reply`, oldest first.
    pub fn stage_notices(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                InferenceCall::ComposeReply { stage_notice, .. } => Some(stage_notice),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: InferenceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl InferenceService for MockInferenceService {
    async fn classify_intent(
        &self,
        catalog: &IntentCatalog,
        utterance: &str,
    ) -> Result<Vec<f64>, InferenceError> {
        self.record(InferenceCall::ClassifyIntent {
            labels: catalog.labels().map(str::to_string).collect(),
            utterance: utterance.to_string(),
        });
        let next = self.script.lock().unwrap().scores.pop_front();
        match next {
            Some(result) => result.map_err(failure),
            None => Ok(vec![0.0; catalog.len()]),
        }
    }

    async fn evaluate_transition(
        &self,
        history: &[ChatMessage],
        utterance: &str,
        stage: Stage,
    ) -> Result<String, InferenceError> {
        self.record(InferenceCall::EvaluateTransition {
            stage,
            utterance: utterance.to_string(),
            history_len: history.len(),
        });
        let next = self.script.lock().unwrap().verdicts.pop_front();
        match next {
            Some(result) => result.map_err(failure),
            None => Ok("no".to_string()),
        }
    }

    async fn compose_reply(&self, request: ReplyRequest<'_>) -> Result<String, InferenceError> {
        self.record(InferenceCall::ComposeReply {
            utterance: request.utterance.to_string(),
            labels: request.catalog.labels().map(str::to_string).collect(),
            polarity_gap: request.polarity_gap.to_vec(),
            from_stage: request.from_stage,
            to_stage: request.to_stage,
            stage_notice: request.stage_notice.to_string(),
            history_len: request.history.len(),
        });
        let next = self.script.lock().unwrap().replies.pop_front();
        match next {
            Some(result) => result.map_err(failure),
            None => Ok(DEFAULT_MOCK_REPLY.to_string()),
        }
    }

    async fn generate(&self, history: &[ChatMessage]) -> Result<String, InferenceError> {
        self.record(InferenceCall::Generate {
            history_len: history.len(),
        });
        let next = self.script.lock().unwrap().generations.pop_front();
        match next {
            Some(result) => result.map_err(failure),
            None => Ok(DEFAULT_MOCK_REPLY.to_string()),
        }
    }
}
