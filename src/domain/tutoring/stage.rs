//! Pedagogical stages of a tutoring session.
//!
//! Stages only move forward, one step at a time:
//! - `Introduction` → `Outline` → `Drafting` → `Assessment`
//!
//! `Assessment` is terminal and is never evaluated for readiness.

use serde::{Deserialize, Serialize};

/// One of the four fixed phases of the essay tutoring dialogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Getting acquainted; waiting for agreement to start the lesson.
    #[default]
    Introduction,

    /// Agreeing on an outline for the essay.
    Outline,

    /// Writing the essay itself.
    Drafting,

    /// Reviewing and grading the finished essay.
    Assessment,
}

impl Stage {
    /// All stages in dialogue order.
    pub const ALL: [Stage; 4] = [
        Stage::Introduction,
        Stage::Outline,
        Stage::Drafting,
        Stage::Assessment,
    ];

    /// Zero-based ordinal.
    pub fn index(&self) -> usize {
        match self {
            Self::Introduction => 0,
            Self::Outline => 1,
            Self::Drafting => 2,
            Self::Assessment => 3,
        }
    }

    /// One-based number shown to participants.
    pub fn display_number(&self) -> usize {
        self.index() + 1
    }

    /// Returns a short label suitable for logs and UI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::Outline => "Outline",
            Self::Drafting => "Drafting",
            Self::Assessment => "Assessment",
        }
    }

    /// The stage that follows this one, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Introduction => Some(Self::Outline),
            Self::Outline => Some(Self::Drafting),
            Self::Drafting => Some(Self::Assessment),
            Self::Assessment => None,
        }
    }

    /// Returns true if no further stage exists.
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}
