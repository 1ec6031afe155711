//! Error types for the tutoring domain

use crate::domain::affect::AffectError;

use super::stage::Stage;

/// Tutoring errors.
///
/// Inference failures are not listed here: the controller answers them with
/// the scripted fallback texts and only logs them. `DimensionMismatch` and
/// `Configuration` are fatal.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum TutorError {
    #[error("Dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid tutoring configuration: {0}")]
    Configuration(String),

    #[error("Stage {0:?} is terminal")]
    TerminalStage(Stage),
}

impl TutorError {
    /// Creates a configuration error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }
}

impl From<AffectError> for TutorError {
    fn from(err: AffectError) -> Self {
        match err {
            AffectError::DimensionMismatch { expected, actual } => {
                TutorError::DimensionMismatch { expected, actual }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affect_error_converts_to_dimension_mismatch() {
        let err: TutorError = AffectError::dimension_mismatch(6, 5).into();

        let mismatch = TutorError::DimensionMismatch {
            expected: 6,
            actual: 5,
        };
        assert_eq!(err, mismatch);
    }

    #[test]
    fn test_configuration_error_display() {
        let err = TutorError::configuration("catalog for stage 2 is empty");

        assert_eq!(
            err.to_string(),
            "Invalid tutoring configuration: catalog for stage 2 is empty"
        );
    }

    #[test]
    fn test_terminal_stage_display() {
        let err = TutorError::TerminalStage(Stage::Assessment);

        assert_eq!(err.to_string(), "Stage Assessment is terminal");
    }
}
