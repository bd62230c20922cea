//! Owned chat state: sessions, models and the two selections.
//!
//! `ChatState` pairs the session store with the model registry. Neither owns
//! the other; the selections are ids validated when read.

use parley_types::config::GlobalConfig;
use parley_types::model::DEFAULT_MODEL_ID;
use parley_types::snapshot::ChatSnapshot;
use tracing::warn;

use crate::chat::store::SessionStore;
use crate::model::registry::ModelRegistry;

#[derive(Debug, Clone, Default)]
pub struct ChatState {
    pub sessions: SessionStore,
    pub models: ModelRegistry,
}

impl ChatState {
    /// Default state: one empty session, the default built-in selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the startup state described by `config`.
    ///
    /// Custom models that fail validation and an unknown `initial_model` are
    /// logged and skipped rather than treated as fatal.
    pub fn from_config(config: &GlobalConfig) -> Self {
        let mut models = ModelRegistry::new();
        for custom in &config.custom_models {
            if let Err(e) = models.add_custom_model_with(
                &custom.name,
                custom.icon.as_deref(),
                custom.color.as_deref(),
            ) {
                warn!(name = %custom.name, error = %e, "Skipping configured model");
            }
        }
        if let Err(e) = models.select_model(&config.initial_model) {
            warn!(error = %e, fallback = DEFAULT_MODEL_ID, "Unknown initial model");
        }

        Self {
            sessions: SessionStore::with_default_title(config.default_session_title.clone()),
            models,
        }
    }

    /// Copy the current state for rendering.
    pub fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            sessions: self.sessions.sessions().to_vec(),
            current_session_id: self.sessions.current_id(),
            models: self.models.list_models().to_vec(),
            selected_model_id: self.models.selected_id().to_string(),
        }
    }
}
