//! Per-turn diagnostic snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::affect::AffectSnapshot;

use super::stage::Stage;

/// What one turn did to the affective model and the stage machine.
///
/// `affect` and `distance` describe the model of `stage_before`, the stage
/// whose model was updated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnDiagnostics {
    pub turn: u64,
    pub stage_before: Stage,
    pub stage_after: Stage,
    pub affect: AffectSnapshot,
    pub distance: f64,
    pub converged: [bool; 4],
    pub advanced: [bool; 4],
    pub recorded_at: DateTime<Utc>,
}
