//! Dialogue session state.
//!
//! One `DialogueSession` exists per connected participant. It is created on
//! connect and dropped on disconnect; nothing is persisted.

use serde::{Deserialize, Serialize};

use super::errors::TutorError;
use super::stage::Stage;

/// Author of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single entry of the dialogue history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Stage position, history and per-stage flags of one session.
///
/// # Invariants
///
/// - `current_stage` never decreases and moves at most one step per turn
/// - `converged` and `advanced` flags are only ever set, never cleared
/// - history only grows, in (user, assistant) pairs after the opening message
#[derive(Debug, Clone, PartialEq)]
pub struct DialogueSession {
    current_stage: Stage,
    previous_stage: Stage,
    history: Vec<ChatMessage>,
    converged: [bool; 4],
    advanced: [bool; 4],
    last_utterance: Option<String>,
}

impl DialogueSession {
    /// Starts a session at the first stage with the opening assistant message.
    pub fn new(opening_message: impl Into<String>) -> Self {
        Self {
            current_stage: Stage::Introduction,
            previous_stage: Stage::Introduction,
            history: vec![ChatMessage::assistant(opening_message)],
            converged: [false; 4],
            advanced: [false; 4],
            last_utterance: None,
        }
    }

    /// Records the start of a turn whose classification succeeded.
    pub fn begin_turn(&mut self, utterance: &str) {
        self.previous_stage = self.current_stage;
        self.last_utterance = Some(utterance.to_string());
    }

    /// Moves to the next stage and flags the stage that was left.
    pub fn advance(&mut self) -> Result<Stage, TutorError> {
        let from = self.current_stage;
        let to = from.next().ok_or(TutorError::TerminalStage(from))?;
        self.advanced[from.index()] = true;
        self.current_stage = to;
        Ok(to)
    }

    pub fn mark_converged(&mut self, stage: Stage) {
        self.converged[stage.index()] = true;
    }

    /// Appends one completed exchange to the history.
    pub fn record_exchange(&mut self, utterance: impl Into<String>, reply: impl Into<String>) {
        self.history.push(ChatMessage::user(utterance));
        self.history.push(ChatMessage::assistant(reply));
    }

    pub fn current_stage(&self) -> Stage {
        self.current_stage
    }

    pub fn previous_stage(&self) -> Stage {
        self.previous_stage
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn converged(&self) -> [bool; 4] {
        self.converged
    }

    pub fn advanced(&self) -> [bool; 4] {
        self.advanced
    }

    pub fn is_converged(&self, stage: Stage) -> bool {
        self.converged[stage.index()]
    }

    pub fn has_advanced(&self, stage: Stage) -> bool {
        self.advanced[stage.index()]
    }

    pub fn last_utterance(&self) -> Option<&str> {
        self.last_utterance.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_starts_with_opening_message() {
        let session = DialogueSession::new("Hello, shall we start?");

        assert_eq!(session.current_stage(), Stage::Introduction);
        assert_eq!(session.previous_stage(), Stage::Introduction);
        assert_eq!(session.history(), &[ChatMessage::assistant("Hello, shall we start?")]);
        assert_eq!(session.converged(), [false; 4]);
        assert_eq!(session.advanced(), [false; 4]);
        assert_eq!(session.last_utterance(), None);
    }

    #[test]
    fn begin_turn_remembers_stage_and_utterance() {
        let mut session = DialogueSession::new("hi");
        session.advance().unwrap();

        session.begin_turn("let's write");

        assert_eq!(session.previous_stage(), Stage::Outline);
        assert_eq!(session.last_utterance(), Some("let's write"));
    }

    mod advance {
        use super::*;

        #[test]
        fn advance_moves_one_stage_and_flags_the_stage_left() {
            let mut session = DialogueSession::new("hi");

            let stage = session.advance().unwrap();

            assert_eq!(stage, Stage::Outline);
            assert_eq!(session.current_stage(), Stage::Outline);
            assert!(session.has_advanced(Stage::Introduction));
            assert!(!session.has_advanced(Stage::Outline));
        }

        #[test]
        fn advance_from_terminal_stage_fails_without_mutation() {
            let mut session = DialogueSession::new("hi");
            for _ in 0..3 {
                session.advance().unwrap();
            }
            let before = session.clone();

            let result = session.advance();

            assert_eq!(result, Err(TutorError::TerminalStage(Stage::Assessment)));
            assert_eq!(session, before);
        }
    }

    #[test]
    fn converged_flag_is_sticky() {
        let mut session = DialogueSession::new("hi");

        session.mark_converged(Stage::Outline);
        session.mark_converged(Stage::Outline);

        assert_eq!(session.converged(), [false, true, false, false]);
    }

    #[test]
    fn record_exchange_appends_user_then_assistant() {
        let mut session = DialogueSession::new("hi");

        session.record_exchange("question", "answer");

        assert_eq!(
            session.history(),
            &[
                ChatMessage::assistant("hi"),
                ChatMessage::user("question"),
                ChatMessage::assistant("answer"),
            ]
        );
    }

    #[test]
    fn chat_role_serializes_to_snake_case() {
        let json = serde_json::to_string(&ChatMessage::user("x")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"x"}"#);
    }
}
