//! Intent catalogs.
//!
//! A catalog names k intent axes. Signed index `+i` is the constructive pole
//! of axis `i`, `-i` its antithesis. Coordinates of full affect vectors are
//! laid out `+1 … +k, −1 … −k`.

use std::collections::BTreeMap;

use super::errors::TutorError;

/// Values at or below this band narrate the antithesis of an axis.
pub const NEUTRAL_BAND: f64 = -0.05;

/// Ordered, even-sized set of intent labels for one stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentCatalog {
    positive: Vec<String>,
    negative: Vec<String>,
}

impl IntentCatalog {
    /// Builds a catalog from `(constructive, antithesis)` label pairs.
    pub fn from_axes<I, S>(axes: I) -> Result<Self, TutorError>
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let (positive, negative): (Vec<String>, Vec<String>) = axes
            .into_iter()
            .map(|(p, n)| (p.into(), n.into()))
            .unzip();

        if positive.is_empty() {
            return Err(TutorError::configuration("intent catalog has no axes"));
        }
        let mut labels = positive.iter().chain(&negative);
        if let Some(label) = labels.find(|l| l.trim().is_empty()) {
            return Err(TutorError::configuration(format!(
                "intent catalog contains a blank label ({:?})",
                label
            )));
        }

        Ok(Self { positive, negative })
    }

    /// Builds a catalog from a signed-index map.
    ///
    /// Every index in `1..=k` must appear with both signs; zero is rejected.
    pub fn from_signed(entries: &BTreeMap<i32, String>) -> Result<Self, TutorError> {
        if entries.contains_key(&0) {
            return Err(TutorError::configuration("intent index 0 is not allowed"));
        }
        if entries.len() % 2 != 0 {
            return Err(TutorError::configuration(format!(
                "intent catalog must have an even number of entries, got {}",
                entries.len()
            )));
        }

        let axes = entries.len() / 2;
        let mut pairs = Vec::with_capacity(axes);
        for axis in 1..=axes as i32 {
            match (entries.get(&axis), entries.get(&-axis)) {
                (Some(p), Some(n)) => pairs.push((p.clone(), n.clone())),
                _ => {
                    return Err(TutorError::configuration(format!(
                        "intent axis {} needs both {} and {}",
                        axis, axis, -axis
                    )))
                }
            }
        }

        Self::from_axes(pairs)
    }

    /// Number of intent axes (k).
    pub fn axes(&self) -> usize {
        self.positive.len()
    }

    /// Number of catalog entries (2k).
    pub fn len(&self) -> usize {
        self.positive.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.positive.is_empty()
    }

    /// Labels in coordinate order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.positive
            .iter()
            .chain(&self.negative)
            .map(String::as_str)
    }

    /// Names the pole of a zero-based `axis` that `value` leans towards.
    ///
    /// Anything above [`NEUTRAL_BAND`] keeps the constructive label.
    pub fn label_for(&self, axis: usize, value: f64) -> Option<&str> {
        let poles = if value > NEUTRAL_BAND { &self.positive } else { &self.negative };
        poles.get(axis).map(String::as_str)
    }
}
