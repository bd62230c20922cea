//! Read-only view of chat state handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatSession, SessionId};
use crate::model::ModelEntry;

/// Everything needed to re-render after a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSnapshot {
    pub sessions: Vec<ChatSession>,
    pub current_session_id: SessionId,
    pub models: Vec<ModelEntry>,
    pub selected_model_id: String,
}

impl ChatSnapshot {
    /// The session currently on screen.
    pub fn current_session(&self) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == self.current_session_id)
    }

    pub fn session(&self, id: SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Resolve a model id against the catalog as it was at snapshot time.
    pub fn model(&self, id: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.id == id)
    }
}
