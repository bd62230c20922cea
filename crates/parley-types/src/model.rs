//! Model registry entry types.
//!
//! A model is a named, selectable response backend. Built-in entries ship
//! with the application; custom entries are added at runtime and keyed by an
//! id derived from their display name.

use serde::{Deserialize, Serialize};

/// Id of the built-in model selected by default and used as the fallback
/// whenever the selected model disappears.
pub const DEFAULT_MODEL_ID: &str = "openai";

/// Presentation hint given to custom models that don't specify an icon.
pub const DEFAULT_CUSTOM_ICON: &str = "🤖";

/// Presentation hint given to custom models that don't specify a color.
pub const DEFAULT_CUSTOM_COLOR: &str = "text-gray-600";

/// A selectable response backend in the model registry.
///
/// `icon` and `color` are opaque to the core and passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// True only for entries added at runtime; only these can be removed.
    pub is_custom: bool,
}

impl ModelEntry {
    fn builtin(id: &str, name: &str, icon: &str, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            color: color.to_string(),
            is_custom: false,
        }
    }
}

/// The built-in catalog, in display order. The first entry is the default.
pub fn builtin_models() -> Vec<ModelEntry> {
    vec![
        ModelEntry::builtin(DEFAULT_MODEL_ID, "OpenAI", "🧠", "text-green-600"),
        ModelEntry::builtin("groq", "Groq", "⚡", "text-orange-600"),
        ModelEntry::builtin("gemini", "Gemini", "✨", "text-purple-600"),
    ]
}

/// Derive a registry id from a display name.
///
/// Lower-cases the name and collapses every whitespace run into a single
/// `-` ("My  Model" -> "my-model"). Leading and trailing whitespace is
/// dropped. Returns an empty string for blank names.
pub fn model_id_from_name(name: &str) -> String {
    name.split_whitespace()
        .map(|part| part.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_from_name() {
        assert_eq!(model_id_from_name("My Model"), "my-model");
        assert_eq!(model_id_from_name("  Llama   3\t70B "), "llama-3-70b");
        assert_eq!(model_id_from_name("GPT-4.1"), "gpt-4.1");
        assert_eq!(model_id_from_name("OpenAI"), "openai");
    }

    #[test]
    fn test_model_id_from_blank_name() {
        assert_eq!(model_id_from_name(""), "");
        assert_eq!(model_id_from_name("   \n "), "");
    }

    #[test]
    fn test_builtins_start_with_default() {
        let models = builtin_models();
        assert_eq!(models[0].id, DEFAULT_MODEL_ID);
        assert_eq!(
            models.iter().map(|m| m.id.as_str()).collect::<Vec<_>>(),
            vec!["openai", "groq", "gemini"]
        );
        assert!(models.iter().all(|m| !m.is_custom));
    }

    #[test]
    fn test_model_entry_serialize() {
        let json = serde_json::to_string(&builtin_models()[1]).unwrap();
        assert!(json.contains("\"id\":\"groq\""));
        assert!(json.contains("\"is_custom\":false"));
    }
}
