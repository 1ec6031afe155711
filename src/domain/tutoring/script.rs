//! Tutoring script - the immutable configuration value behind every session.
//!
//! Built once at process start and shared (`Arc<TutorScript>`) by all
//! controllers. Holds one [`StageScript`] per stage plus the fixed texts a
//! controller falls back to.

use crate::domain::affect::AffectiveStateModel;

use super::catalog::IntentCatalog;
use super::errors::TutorError;
use super::stage::Stage;

/// Default convergence threshold for every stage.
pub const DEFAULT_CONVERGENCE_THRESHOLD: f64 = 0.25;

/// Script of a single stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageScript {
    /// Intent catalog used for classification in this stage.
    pub catalog: IntentCatalog,
    /// Distance below which the stage's affect counts as converged.
    pub convergence_threshold: f64,
    /// Narrative announced when the dialogue leaves this stage.
    pub transition_narrative: Option<String>,
    /// Scripted starting feeling; the indifference prior when absent.
    pub initial_feeling: Option<Vec<f64>>,
}

impl StageScript {
    /// Creates a stage script with the default threshold and no narrative.
    pub fn new(catalog: IntentCatalog) -> Self {
        Self {
            catalog,
            convergence_threshold: DEFAULT_CONVERGENCE_THRESHOLD,
            transition_narrative: None,
            initial_feeling: None,
        }
    }

    /// Sets the narrative used when leaving this stage.
    pub fn with_transition_narrative(mut self, narrative: impl Into<String>) -> Self {
        self.transition_narrative = Some(narrative.into());
        self
    }

    /// Sets the starting feeling vector.
    pub fn with_initial_feeling(mut self, feeling: Vec<f64>) -> Self {
        self.initial_feeling = Some(feeling);
        self
    }

    /// Sets the convergence threshold.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold;
        self
    }

    /// Allocates a fresh affective model sized to this stage's catalog.
    pub fn new_model(&self) -> Result<AffectiveStateModel, TutorError> {
        match &self.initial_feeling {
            Some(feeling) => {
                Ok(AffectiveStateModel::with_initial_feeling(self.catalog.axes(), feeling.clone())?)
            }
            None => Ok(AffectiveStateModel::new(self.catalog.axes())),
        }
    }
}

/// Fixed texts returned when a collaborator fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackReplies {
    /// Returned when intent classification fails and the turn is aborted.
    pub service_unavailable: String,
    /// Returned when reply generation fails after the state was updated.
    pub generation_failed: String,
    /// Returned by the stateless tutor when generation fails.
    pub stateless_failed: String,
}

impl Default for FallbackReplies {
    fn default() -> Self {
        Self {
            service_unavailable: "Could not reach the tutoring service. Please try again."
                .to_string(),
            generation_failed: "Could not get a reply from the tutoring service.".to_string(),
            stateless_failed: "Connection to the tutoring service failed.".to_string(),
        }
    }
}

/// Complete, validated tutoring script.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorScript {
    stages: [StageScript; 4],
    opening_message: String,
    stateless_system_prompt: String,
    affirmative_tokens: Vec<String>,
    fallbacks: FallbackReplies,
}

impl TutorScript {
    /// Validates and assembles a script.
    ///
    /// Fails with `TutorError::Configuration` when a threshold is not
    /// positive, an initial feeling does not match its catalog, or no
    /// affirmative token is given.
    pub fn new(
        stages: [StageScript; 4],
        opening_message: impl Into<String>,
        stateless_system_prompt: impl Into<String>,
        affirmative_tokens: Vec<String>,
        fallbacks: FallbackReplies,
    ) -> Result<Self, TutorError> {
        for (stage, script) in Stage::ALL.iter().zip(&stages) {
            if !(script.convergence_threshold > 0.0) {
                return Err(TutorError::configuration(format!(
                    "convergence threshold of stage {} must be positive",
                    stage.display_number()
                )));
            }
            script.new_model().map_err(|err| {
                TutorError::configuration(format!(
                    "initial feeling of stage {}: {}",
                    stage.display_number(),
                    err
                ))
            })?;
        }

        let affirmative_tokens: Vec<String> = affirmative_tokens
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if affirmative_tokens.is_empty() {
            return Err(TutorError::configuration("at least one affirmative token is required"));
        }

        Ok(Self {
            stages,
            opening_message: opening_message.into(),
            stateless_system_prompt: stateless_system_prompt.into(),
            affirmative_tokens,
            fallbacks,
        })
    }

    /// Script of the given stage.
    pub fn stage(&self, stage: Stage) -> &StageScript {
        &self.stages[stage.index()]
    }

    /// First assistant message of every staged session.
    pub fn opening_message(&self) -> &str {
        &self.opening_message
    }

    /// System prompt seeding every stateless session.
    pub fn stateless_system_prompt(&self) -> &str {
        &self.stateless_system_prompt
    }

    pub fn fallbacks(&self) -> &FallbackReplies {
        &self.fallbacks
    }

    /// Allocates the four per-stage models of a new session.
    pub fn new_models(&self) -> Result<[AffectiveStateModel; 4], TutorError> {
        Ok([
            self.stage(Stage::Introduction).new_model()?,
            self.stage(Stage::Outline).new_model()?,
            self.stage(Stage::Drafting).new_model()?,
            self.stage(Stage::Assessment).new_model()?,
        ])
    }

    /// Returns true if a readiness verdict contains an affirmative token as a
    /// whole word, ignoring case.
    pub fn is_affirmative(&self, verdict: &str) -> bool {
        verdict
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| self.affirmative_tokens.iter().any(|t| t == word))
    }

    /// Stage notice passed to reply generation.
    ///
    /// A single forward step announces the narrative of the stage being
    /// left; every other combination gets the generic one-based notice.
    pub fn transition_notice(&self, previous: Stage, current: Stage) -> String {
        let narrative = match (previous, current) {
            (Stage::Introduction, Stage::Outline) => self.narrative(Stage::Introduction),
            (Stage::Outline, Stage::Drafting) => self.narrative(Stage::Outline),
            (Stage::Drafting, Stage::Assessment) => self.narrative(Stage::Drafting),
            _ => None,
        };

        match narrative {
            Some(text) => text.to_string(),
            None => format!("You are currently at stage {}.", current.display_number()),
        }
    }

    fn narrative(&self, leaving: Stage) -> Option<&str> {
        self.stage(leaving).transition_narrative.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_script(narrative: &str) -> StageScript {
        StageScript::new(IntentCatalog::from_axes([("engaged", "bored")]).unwrap())
            .with_transition_narrative(narrative)
    }

    fn build(stages: [StageScript; 4], affirmative: &str) -> Result<TutorScript, TutorError> {
        let tokens = vec![affirmative.to_string()];
        TutorScript::new(stages, "hi", "sys", tokens, FallbackReplies::default())
    }

    fn script() -> TutorScript {
        TutorScript::new(
            [
                stage_script("Let's move on to the outline."),
                stage_script("Great outline, start writing."),
                stage_script("Essay received, let's review it."),
                StageScript::new(IntentCatalog::from_axes([("engaged", "bored")]).unwrap()),
            ],
            "Hello!",
            "You are a tutor.",
            vec!["Yes".to_string()],
            FallbackReplies::default(),
        )
        .unwrap()
    }

    mod validation {
        use super::*;

        #[test]
        fn rejects_non_positive_threshold() {
            let stages = [
                stage_script("a").with_convergence_threshold(0.0),
                stage_script("b"),
                stage_script("c"),
                stage_script("d"),
            ];
            let result = build(stages, "yes");
            assert!(matches!(result, Err(TutorError::Configuration(_))));
        }

        #[test]
        fn rejects_mismatched_initial_feeling() {
            let stages = [
                stage_script("a"),
                stage_script("b").with_initial_feeling(vec![0.5, 0.5, 0.5]),
                stage_script("c"),
                stage_script("d"),
            ];
            let err = build(stages, "yes").unwrap_err();
            assert!(err.to_string().contains("stage 2"));
        }

        #[test]
        fn rejects_missing_affirmative_tokens() {
            let stages = [
                stage_script("a"),
                stage_script("b"),
                stage_script("c"),
                stage_script("d"),
            ];
            let result = build(stages, "  ");
            assert!(result.is_err());
        }
    }

    mod affirmative {
        use super::*;

        #[test]
        fn matches_whole_words_case_insensitively() {
            let script = script();
            assert!(script.is_affirmative("Yes"));
            assert!(script.is_affirmative("yes."));
            assert!(script.is_affirmative("  YES, the outline is complete"));
        }

        #[test]
        fn ignores_negative_and_embedded_tokens() {
            let script = script();
            assert!(!script.is_affirmative("no"));
            assert!(!script.is_affirmative("eyes"));
            assert!(!script.is_affirmative(""));
        }
    }

    mod transition_notice {
        use super::*;

        #[test]
        fn forward_steps_use_narrative_of_stage_left() {
            let script = script();
            assert_eq!(
                script.transition_notice(Stage::Introduction, Stage::Outline),
                "Let's move on to the outline."
            );
            assert_eq!(
                script.transition_notice(Stage::Outline, Stage::Drafting),
                "Great outline, start writing."
            );
            assert_eq!(
                script.transition_notice(Stage::Drafting, Stage::Assessment),
                "Essay received, let's review it."
            );
        }

        #[test]
        fn unchanged_stage_gets_one_based_notice() {
            let script = script();
            assert_eq!(
                script.transition_notice(Stage::Outline, Stage::Outline),
                "You are currently at stage 2."
            );
            assert_eq!(
                script.transition_notice(Stage::Assessment, Stage::Assessment),
                "You are currently at stage 4."
            );
        }

        #[test]
        fn skipped_or_backward_pairs_get_generic_notice() {
            let script = script();
            assert_eq!(
                script.transition_notice(Stage::Introduction, Stage::Drafting),
                "You are currently at stage 3."
            );
            assert_eq!(
                script.transition_notice(Stage::Drafting, Stage::Outline),
                "You are currently at stage 2."
            );
        }

        #[test]
        fn missing_narrative_falls_back_to_generic_notice() {
            let stages = [
                StageScript::new(IntentCatalog::from_axes([("engaged", "bored")]).unwrap()),
                stage_script("b"),
                stage_script("c"),
                stage_script("d"),
            ];
            let script = build(stages, "yes").unwrap();

            assert_eq!(
                script.transition_notice(Stage::Introduction, Stage::Outline),
                "You are currently at stage 2."
            );
        }
    }

    #[test]
    fn new_models_are_sized_per_stage() {
        let models = script().new_models().unwrap();
        for model in &models {
            assert_eq!(model.width(), 2);
            assert_eq!(model.feeling(), &[0.5, 0.5]);
        }
    }

    #[test]
    fn stage_script_uses_scripted_initial_feeling() {
        let stage = stage_script("a").with_initial_feeling(vec![0.8, 0.2]);
        let model = stage.new_model().unwrap();
        assert_eq!(model.feeling(), &[0.8, 0.2]);
    }
}
