//! Two-timescale appraisal/feeling dynamics for a single stage.
//!
//! Full vectors have one coordinate per catalog entry (2k). The first k
//! coordinates are the constructive poles, the last k their antitheses, so
//! the derived per-axis states are `first half − second half`.

use serde::Serialize;

use super::errors::AffectError;

/// Rate at which appraisal catches up with the classified evidence (`r`).
pub const APPRAISAL_CATCH_UP_RATE: f64 = 0.1;

/// Rate at which feeling pursues the updated appraisal (`p`, with `p ≪ r`).
pub const AFFECTIVE_INERTIA_RATE: f64 = 0.03;

/// Initial activation of every feeling coordinate.
pub const INDIFFERENCE_PRIOR: f64 = 0.5;

/// Appraisal and feeling vectors of one stage and their update law.
#[derive(Debug, Clone, PartialEq)]
pub struct AffectiveStateModel {
    axes: usize,
    appraisal: Vec<f64>,
    feeling: Vec<f64>,
    appraisal_state: Vec<f64>,
    feeling_state: Vec<f64>,
}

/// Owned copy of a model's vectors, used for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AffectSnapshot {
    pub appraisal: Vec<f64>,
    pub feeling: Vec<f64>,
    pub appraisal_state: Vec<f64>,
    pub feeling_state: Vec<f64>,
}

impl AffectiveStateModel {
    /// Creates a model over `axes` intent axes: zero appraisal, feeling at
    /// the indifference prior.
    pub fn new(axes: usize) -> Self {
        let width = axes * 2;
        Self::from_vectors(axes, vec![0.0; width], vec![INDIFFERENCE_PRIOR; width])
    }

    /// Creates a model whose feeling starts from a scripted vector instead of
    /// the indifference prior.
    pub fn with_initial_feeling(axes: usize, feeling: Vec<f64>) -> Result<Self, AffectError> {
        let width = axes * 2;
        if feeling.len() != width {
            return Err(AffectError::dimension_mismatch(width, feeling.len()));
        }
        Ok(Self::from_vectors(axes, vec![0.0; width], feeling))
    }

    fn from_vectors(axes: usize, appraisal: Vec<f64>, feeling: Vec<f64>) -> Self {
        let appraisal_state = polarity(&appraisal, axes);
        let feeling_state = polarity(&feeling, axes);
        Self {
            axes,
            appraisal,
            feeling,
            appraisal_state,
            feeling_state,
        }
    }

    /// Applies one observation of classified evidence.
    ///
    /// ```text
    /// appraisal' = (1 − r)·appraisal + r·action
    /// feeling'   = (1 − p)·feeling   + p·(appraisal' − feeling)
    /// ```
    ///
    /// Nothing is mutated when `action` has the wrong length.
    pub fn update(&mut self, action: &[f64]) -> Result<(), AffectError> {
        if action.len() != self.width() {
            return Err(AffectError::dimension_mismatch(self.width(), action.len()));
        }

        let r = APPRAISAL_CATCH_UP_RATE;
        let p = AFFECTIVE_INERTIA_RATE;

        for (appraisal, evidence) in self.appraisal.iter_mut().zip(action) {
            *appraisal = (1.0 - r) * *appraisal + r * evidence;
        }
        for (feeling, appraisal) in self.feeling.iter_mut().zip(&self.appraisal) {
            *feeling = (1.0 - p) * *feeling + p * (appraisal - *feeling);
        }

        self.appraisal_state = polarity(&self.appraisal, self.axes);
        self.feeling_state = polarity(&self.feeling, self.axes);
        Ok(())
    }

    /// Euclidean distance between two per-axis state vectors.
    pub fn distance(a: &[f64], b: &[f64]) -> Result<f64, AffectError> {
        if a.len() != b.len() {
            return Err(AffectError::dimension_mismatch(a.len(), b.len()));
        }
        Ok(a
            .iter()
            .zip(b)
            .map(|(x, y)| (x - y).powi(2))
            .sum::<f64>()
            .sqrt())
    }

    /// Distance between the current appraisal and feeling states.
    pub fn convergence_distance(&self) -> Result<f64, AffectError> {
        Self::distance(&self.appraisal_state, &self.feeling_state)
    }

    /// Per-axis `appraisal_state − feeling_state`.
    pub fn polarity_gap(&self) -> Vec<f64> {
        self.appraisal_state
            .iter()
            .zip(&self.feeling_state)
            .map(|(a, f)| a - f)
            .collect()
    }

    /// Number of intent axes (k).
    pub fn axes(&self) -> usize {
        self.axes
    }

    /// Length of the full vectors (2k).
    pub fn width(&self) -> usize {
        self.axes * 2
    }

    pub fn appraisal(&self) -> &[f64] {
        &self.appraisal
    }

    pub fn feeling(&self) -> &[f64] {
        &self.feeling
    }

    pub fn appraisal_state(&self) -> &[f64] {
        &self.appraisal_state
    }

    pub fn feeling_state(&self) -> &[f64] {
        &self.feeling_state
    }

    /// Copies all four vectors.
    pub fn snapshot(&self) -> AffectSnapshot {
        AffectSnapshot {
            appraisal: self.appraisal.clone(),
            feeling: self.feeling.clone(),
            appraisal_state: self.appraisal_state.clone(),
            feeling_state: self.feeling_state.clone(),
        }
    }
}

fn polarity(full: &[f64], axes: usize) -> Vec<f64> {
    let (positive, negative) = full.split_at(axes);
    positive.iter().zip(negative).map(|(p, n)| p - n).collect()
}
