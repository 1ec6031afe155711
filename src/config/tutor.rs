//! Tutoring script configuration
//!
//! The script is YAML. Without a configured path the built-in essay tutor
//! is used.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::tutoring::{
    FallbackReplies, IntentCatalog, StageScript, TutorError, TutorScript,
    DEFAULT_CONVERGENCE_THRESHOLD,
};

use super::error::{ConfigError, ValidationError};

/// Built-in tutoring script.
pub const DEFAULT_SCRIPT: &str = include_str!("../../scripts/essay_tutor.yaml");

/// Tutoring configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TutorConfig {
    /// Path to a YAML tutoring script
    pub script_path: Option<PathBuf>,
}

impl TutorConfig {
    /// Validate tutoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.script_path {
            Some(path) if !path.is_file() => {
                Err(ValidationError::ScriptNotFound(path.display().to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Read and validate the configured script.
    pub fn load_script(&self) -> Result<TutorScript, ConfigError> {
        match &self.script_path {
            Some(path) => {
                let source =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::ScriptRead {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!(path = %path.display(), "Loading tutoring script");
                parse_script(&source)
            }
            None => parse_script(DEFAULT_SCRIPT),
        }
    }
}

/// Parse a YAML tutoring script.
pub fn parse_script(source: &str) -> Result<TutorScript, ConfigError> {
    let file: ScriptFile = serde_yaml::from_str(source)?;
    Ok(file.into_script()?)
}

#[derive(Debug, Deserialize)]
struct ScriptFile {
    opening_message: String,
    stateless_system_prompt: String,
    #[serde(default = "default_affirmative_tokens")]
    affirmative_tokens: Vec<String>,
    #[serde(default)]
    fallbacks: Option<FallbackFile>,
    stages: Vec<StageFile>,
}

#[derive(Debug, Deserialize)]
struct StageFile {
    catalog: BTreeMap<i32, String>,
    #[serde(default = "default_threshold")]
    convergence_threshold: f64,
    transition_narrative: Option<String>,
    initial_feeling: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct FallbackFile {
    service_unavailable: Option<String>,
    generation_failed: Option<String>,
    stateless_failed: Option<String>,
}

impl ScriptFile {
    fn into_script(self) -> Result<TutorScript, TutorError> {
        let count = self.stages.len();
        let stages: [StageFile; 4] = self.stages.try_into().map_err(|_| {
            TutorError::configuration(format!("a script needs exactly 4 stages, got {}", count))
        })?;

        let [first, second, third, fourth] = stages;
        let stages = [
            first.into_stage()?,
            second.into_stage()?,
            third.into_stage()?,
            fourth.into_stage()?,
        ];

        TutorScript::new(
            stages,
            self.opening_message,
            self.stateless_system_prompt,
            self.affirmative_tokens,
            self.fallbacks.map(FallbackFile::into_replies).unwrap_or_default(),
        )
    }
}

impl StageFile {
    fn into_stage(self) -> Result<StageScript, TutorError> {
        let mut stage = StageScript::new(IntentCatalog::from_signed(&self.catalog)?)
            .with_convergence_threshold(self.convergence_threshold);
        if let Some(narrative) = self.transition_narrative {
            stage = stage.with_transition_narrative(narrative);
        }
        if let Some(feeling) = self.initial_feeling {
            stage = stage.with_initial_feeling(feeling);
        }
        Ok(stage)
    }
}

impl FallbackFile {
    fn into_replies(self) -> FallbackReplies {
        let defaults = FallbackReplies::default();
        FallbackReplies {
            service_unavailable: self.service_unavailable.unwrap_or(defaults.service_unavailable),
            generation_failed: self.generation_failed.unwrap_or(defaults.generation_failed),
            stateless_failed: self.stateless_failed.unwrap_or(defaults.stateless_failed),
        }
    }
}

fn default_affirmative_tokens() -> Vec<String> {
    vec!["yes".to_string()]
}

fn default_threshold() -> f64 {
    DEFAULT_CONVERGENCE_THRESHOLD
}
