//! Live tutoring sessions keyed by server-generated session id.
//!
//! # Thread Safety
//!
//! The maps sit behind `RwLock`. Each session sits behind its own async
//! `Mutex`, so turns of one session are serialized while different sessions
//! run independently.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::SessionId;
use crate::domain::tutoring::{TutorError, TutorScript};
use crate::ports::InferenceService;

use super::handlers::{StageController, StatelessTutor};

/// Shared handle to one staged session.
pub type SharedController = Arc<Mutex<StageController>>;

/// Shared handle to one stateless session.
pub type SharedStatelessTutor = Arc<Mutex<StatelessTutor>>;

/// Creates and discards tutoring sessions.
pub struct SessionRegistry {
    script: Arc<TutorScript>,
    inference: Arc<dyn InferenceService>,
    staged: RwLock<HashMap<SessionId, SharedController>>,
    stateless: RwLock<HashMap<SessionId, SharedStatelessTutor>>,
}

impl SessionRegistry {
    pub fn new(script: Arc<TutorScript>, inference: Arc<dyn InferenceService>) -> Self {
        Self {
            script,
            inference,
            staged: RwLock::new(HashMap::new()),
            stateless: RwLock::new(HashMap::new()),
        }
    }

    /// Starts a staged session with fresh affective models.
    pub async fn create_session(&self) -> Result<(SessionId, SharedController), TutorError> {
        let session_id = SessionId::new();
        let controller =
            StageController::new(session_id, self.script.clone(), self.inference.clone())?;
        let controller = Arc::new(Mutex::new(controller));

        self.staged.write().await.insert(session_id, controller.clone());
        tracing::debug!(session_id = %session_id, "Staged session created");

        Ok((session_id, controller))
    }

    /// Starts a stateless session.
    pub async fn create_stateless_session(&self) -> (SessionId, SharedStatelessTutor) {
        let session_id = SessionId::new();
        let tutor = StatelessTutor::new(session_id, self.script.clone(), self.inference.clone());
        let tutor = Arc::new(Mutex::new(tutor));

        self.stateless.write().await.insert(session_id, tutor.clone());
        tracing::debug!(session_id = %session_id, "Stateless session created");

        (session_id, tutor)
    }

    /// Discards a session of either kind. Returns true if one was removed.
    pub async fn remove(&self, session_id: &SessionId) -> bool {
        let staged = self.staged.write().await.remove(session_id).is_some();
        let stateless = self.stateless.write().await.remove(session_id).is_some();
        staged || stateless
    }

    /// Number of live sessions of both kinds.
    pub async fn len(&self) -> usize {
        self.staged.read().await.len() + self.stateless.read().await.len()
    }
}
