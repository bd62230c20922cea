//! Model registry: the catalog of selectable response backends.
//!
//! Built-in entries come first in a fixed order, followed by custom entries
//! in the order they were added. The registry also tracks which model is
//! selected and keeps that selection pointing at a live entry.

use parley_types::error::ModelError;
use parley_types::model::{
    DEFAULT_CUSTOM_COLOR, DEFAULT_CUSTOM_ICON, DEFAULT_MODEL_ID, ModelEntry, builtin_models,
    model_id_from_name,
};
use tracing::{debug, info};

/// Registry of available models, indexed by derived id.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: Vec<ModelEntry>,
    selected: String,
}

impl ModelRegistry {
    /// Create a registry holding only the built-in models, with the default
    /// built-in selected.
    pub fn new() -> Self {
        Self {
            models: builtin_models(),
            selected: DEFAULT_MODEL_ID.to_string(),
        }
    }

    /// All models, built-ins first. Never empty.
    pub fn list_models(&self) -> &[ModelEntry] {
        &self.models
    }

    /// Look up a model by id.
    pub fn resolve(&self, id: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.id == id)
    }

    /// Add a custom model with the default presentation hints.
    pub fn add_custom_model(&mut self, name: &str) -> Result<ModelEntry, ModelError> {
        self.add_custom_model_with(name, None, None)
    }

    /// Add a custom model, optionally overriding its icon and color.
    ///
    /// The id is derived from `name`; blank names and ids that collide with
    /// an existing entry (built-in or custom) are rejected.
    pub fn add_custom_model_with(
        &mut self,
        name: &str,
        icon: Option<&str>,
        color: Option<&str>,
    ) -> Result<ModelEntry, ModelError> {
        let id = model_id_from_name(name);
        if id.is_empty() {
            return Err(ModelError::InvalidModelName);
        }
        if self.resolve(&id).is_some() {
            return Err(ModelError::DuplicateModelId(id));
        }

        let entry = ModelEntry {
            id,
            name: name.trim().to_string(),
            icon: icon.unwrap_or(DEFAULT_CUSTOM_ICON).to_string(),
            color: color.unwrap_or(DEFAULT_CUSTOM_COLOR).to_string(),
            is_custom: true,
        };
        self.models.push(entry.clone());
        info!(model = %entry.id, "Custom model added");
        Ok(entry)
    }

    /// Remove a custom model.
    ///
    /// Built-ins cannot be removed. Unknown ids are a no-op. Returns whether
    /// an entry was removed. If the removed model was selected, selection
    /// falls back to the default built-in.
    pub fn remove_custom_model(&mut self, id: &str) -> Result<bool, ModelError> {
        let Some(pos) = self.models.iter().position(|m| m.id == id) else {
            debug!(model = %id, "Ignoring removal of unknown model");
            return Ok(false);
        };
        if !self.models[pos].is_custom {
            return Err(ModelError::ModelNotRemovable(id.to_string()));
        }

        self.models.remove(pos);
        if self.selected == id {
            self.selected = DEFAULT_MODEL_ID.to_string();
            info!(model = %id, fallback = DEFAULT_MODEL_ID, "Selected model removed, selection reset");
        } else {
            info!(model = %id, "Custom model removed");
        }
        Ok(true)
    }

    /// Select the model used for subsequent sends.
    pub fn select_model(&mut self, id: &str) -> Result<&ModelEntry, ModelError> {
        let pos = self
            .models
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| ModelError::ModelNotFound(id.to_string()))?;
        self.selected = id.to_string();
        Ok(&self.models[pos])
    }

    /// Id of the selected model, validated against the catalog.
    pub fn selected_id(&self) -> &str {
        &self.selected().id
    }

    /// The selected model.
    ///
    /// If the stored selection no longer resolves, the default built-in is
    /// returned instead; built-ins are never removed, so this always succeeds.
    pub fn selected(&self) -> &ModelEntry {
        self.resolve(&self.selected)
            .or_else(|| self.resolve(DEFAULT_MODEL_ID))
            .unwrap_or(&self.models[0])
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
