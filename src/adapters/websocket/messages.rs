//! WebSocket frame types for tutoring sessions.
//!
//! Requests and replies share one shape: the reply echoes `type` and
//! `timestamp` and carries the tutor's text in `content`. Errors are sent
//! as a separate frame with a machine-readable code.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A chat frame in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorFrame {
    /// Free-form frame kind chosen by the client (e.g. "chat", "essay").
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    /// Client-supplied ISO timestamp, echoed back untouched.
    pub timestamp: String,
}

impl TutorFrame {
    /// Parses a client text frame.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Builds the reply frame for this request.
    pub fn reply(&self, content: impl Into<String>) -> Self {
        Self {
            kind: self.kind.clone(),
            content: content.into(),
            timestamp: self.timestamp.clone(),
        }
    }
}

/// Error frame sent to the client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorFrame {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub code: &'static str,
    pub message: String,
    pub timestamp: String,
}

impl ErrorFrame {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            code,
            message: message.into(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// The client frame could not be parsed; the session continues.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new("malformed_frame", message)
    }

    /// The session hit an unrecoverable error and is being closed.
    pub fn session_failed(message: impl Into<String>) -> Self {
        Self::new("session_failed", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_client_frame() {
        let raw = r#"{"type":"chat","content":"Hi","timestamp":"2024-05-01T10:00:00Z"}"#;
        let frame = TutorFrame::parse(raw).unwrap();

        assert_eq!(frame.kind, "chat");
        assert_eq!(frame.content, "Hi");
        assert_eq!(frame.timestamp, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn rejects_frame_without_content() {
        assert!(TutorFrame::parse(r#"{"type":"chat","timestamp":"t"}"#).is_err());
        assert!(TutorFrame::parse("not json").is_err());
    }

    #[test]
    fn reply_echoes_type_and_timestamp() {
        let request = TutorFrame {
            kind: "essay".to_string(),
            content: "My essay".to_string(),
            timestamp: "t1".to_string(),
        };

        let json = serde_json::to_value(request.reply("Nice work")).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"type": "essay", "content": "Nice work", "timestamp": "t1"})
        );
    }

    #[test]
    fn error_frame_serializes_with_type_error() {
        let json = serde_json::to_value(ErrorFrame::malformed("missing field `content`")).unwrap();

        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "malformed_frame");
        assert_eq!(json["message"], "missing field `content`");
    }
}
