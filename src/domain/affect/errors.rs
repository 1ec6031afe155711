//! Error types for the affective state model

/// Affective model errors
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AffectError {
    #[error("Dimension mismatch: expected {expected} components, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl AffectError {
    /// Creates a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { expected, actual }
    }
}
