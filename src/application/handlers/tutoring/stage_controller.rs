//! StageController - one tutoring session's turn protocol.
//!
//! A turn classifies the utterance against the current stage's catalog,
//! feeds the scores into that stage's affective model, asks whether the
//! dialogue may move on, and composes the reply. Turns are strictly
//! sequential: `handle_turn` takes `&mut self`.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::affect::AffectiveStateModel;
use crate::domain::foundation::SessionId;
use crate::domain::tutoring::{DialogueSession, Stage, TurnDiagnostics, TutorError, TutorScript};
use crate::ports::{InferenceService, ReplyRequest};

/// Drives the four-stage tutoring dialogue of a single session.
pub struct StageController {
    session_id: SessionId,
    script: Arc<TutorScript>,
    inference: Arc<dyn InferenceService>,
    models: [AffectiveStateModel; 4],
    session: DialogueSession,
    turns: u64,
    last_diagnostics: Option<TurnDiagnostics>,
}

impl StageController {
    /// Allocates the per-stage models and an empty dialogue.
    pub fn new(
        session_id: SessionId,
        script: Arc<TutorScript>,
        inference: Arc<dyn InferenceService>,
    ) -> Result<Self, TutorError> {
        let models = script.new_models()?;
        let session = DialogueSession::new(script.opening_message());

        Ok(Self {
            session_id,
            script,
            inference,
            models,
            session,
            turns: 0,
            last_diagnostics: None,
        })
    }

    /// Processes one participant utterance and returns the tutor's reply.
    ///
    /// Collaborator failures are answered with the scripted fallback texts.
    /// Only a dimension mismatch between the classifier output and the
    /// stage's model is returned as an error, with nothing mutated.
    pub async fn handle_turn(&mut self, utterance: &str) -> Result<String, TutorError> {
        let stage = self.session.current_stage();
        let stage_script = self.script.stage(stage);

        // 1. Classify
        let classified = self
            .inference
            .classify_intent(&stage_script.catalog, utterance)
            .await;
        let action = match classified {
            Ok(action) => action,
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    stage = stage.label(),
                    error = %err,
                    "Intent classification failed, turn aborted"
                );
                return Ok(self.script.fallbacks().service_unavailable.clone());
            }
        };

        // 2. Update the active model
        let model = &mut self.models[stage.index()];
        if let Err(err) = model.update(&action) {
            tracing::error!(
                session_id = %self.session_id,
                stage = stage.label(),
                error = %err,
                "Classifier output does not fit the stage model"
            );
            return Err(err.into());
        }
        self.session.begin_turn(utterance);

        // 3. Convergence distance
        let distance = model.convergence_distance()?;

        // 4. Readiness check
        if !stage.is_terminal() {
            let verdict = self
                .inference
                .evaluate_transition(self.session.history(), utterance, stage)
                .await;
            match verdict {
                Ok(verdict) if self.script.is_affirmative(&verdict) => {
                    let next = self.session.advance()?;
                    tracing::info!(
                        session_id = %self.session_id,
                        from = stage.label(),
                        to = next.label(),
                        "Stage advanced"
                    );
                }
                Ok(verdict) => {
                    tracing::debug!(
                        session_id = %self.session_id,
                        verdict = %verdict,
                        "Stage kept"
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        session_id = %self.session_id,
                        stage = stage.label(),
                        error = %err,
                        "Readiness check failed, stage kept"
                    );
                }
            }
        }

        // 5. Convergence flag
        let current = self.session.current_stage();
        if distance < stage_script.convergence_threshold {
            self.session.mark_converged(current);
        }

        // 6. Reply
        let polarity_gap = self.models[current.index()].polarity_gap();
        let notice = self
            .script
            .transition_notice(self.session.previous_stage(), current);
        let request = ReplyRequest {
            utterance,
            history: self.session.history(),
            catalog: &self.script.stage(current).catalog,
            polarity_gap: &polarity_gap,
            from_stage: self.session.previous_stage(),
            to_stage: current,
            stage_notice: &notice,
        };
        let composed = self.inference.compose_reply(request).await;
        let reply = match composed {
            Ok(reply) => reply,
            Err(err) => {
                tracing::warn!(
                    session_id = %self.session_id,
                    stage = current.label(),
                    error = %err,
                    "Reply generation failed, sending fallback"
                );
                self.script.fallbacks().generation_failed.clone()
            }
        };

        // 7. Record
        self.session.record_exchange(utterance, reply.clone());
        self.turns += 1;
        self.record_diagnostics(stage, current, distance);

        Ok(reply)
    }

    fn record_diagnostics(&mut self, stage_before: Stage, stage_after: Stage, distance: f64) {
        let diagnostics = TurnDiagnostics {
            turn: self.turns,
            stage_before,
            stage_after,
            affect: self.models[stage_before.index()].snapshot(),
            distance,
            converged: self.session.converged(),
            advanced: self.session.advanced(),
            recorded_at: Utc::now(),
        };

        tracing::info!(
            target: "virtual_tutor::diagnostics",
            session_id = %self.session_id,
            turn = diagnostics.turn,
            stage = stage_before.label(),
            stage_after = stage_after.label(),
            distance,
            appraisal = ?diagnostics.affect.appraisal,
            feeling = ?diagnostics.affect.feeling,
            appraisal_state = ?diagnostics.affect.appraisal_state,
            feeling_state = ?diagnostics.affect.feeling_state,
            converged = ?diagnostics.converged,
            advanced = ?diagnostics.advanced,
            "Turn completed"
        );

        self.last_diagnostics = Some(diagnostics);
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn session(&self) -> &DialogueSession {
        &self.session
    }

    pub fn current_stage(&self) -> Stage {
        self.session.current_stage()
    }

    /// Affective model of the given stage.
    pub fn model(&self, stage: Stage) -> &AffectiveStateModel {
        &self.models[stage.index()]
    }

    /// Number of completed turns (aborted turns are not counted).
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn last_diagnostics(&self) -> Option<&TurnDiagnostics> {
        self.last_diagnostics.as_ref()
    }
}
