//! Global configuration types for Parley.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! startup model selection, simulated reply latency and extra models.

use serde::{Deserialize, Serialize};

use crate::model::DEFAULT_MODEL_ID;

/// Top-level configuration for Parley.
///
/// Loaded from `~/.parley/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Model selected at startup. Unknown ids fall back to the default built-in.
    #[serde(default = "default_initial_model")]
    pub initial_model: String,

    /// Latency of the simulated dispatcher, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Title given to newly created sessions.
    #[serde(default = "default_session_title")]
    pub default_session_title: String,

    /// Append a bot message describing dispatcher failures instead of
    /// silently dropping the reply.
    #[serde(default)]
    pub surface_dispatch_errors: bool,

    /// Custom models registered at startup, in order.
    #[serde(default)]
    pub custom_models: Vec<CustomModelConfig>,
}

fn default_initial_model() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_reply_delay_ms() -> u64 {
    1_000
}

fn default_session_title() -> String {
    "New Chat".to_string()
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            initial_model: default_initial_model(),
            reply_delay_ms: default_reply_delay_ms(),
            default_session_title: default_session_title(),
            surface_dispatch_errors: false,
            custom_models: Vec::new(),
        }
    }
}

/// A custom model declared in `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomModelConfig {
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.initial_model, "openai");
        assert_eq!(config.reply_delay_ms, 1_000);
        assert_eq!(config.default_session_title, "New Chat");
        assert!(!config.surface_dispatch_errors);
        assert!(config.custom_models.is_empty());
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.initial_model, "openai");
        assert_eq!(config.reply_delay_ms, 1_000);
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
initial_model = "groq"
reply_delay_ms = 250
surface_dispatch_errors = true

[[custom_models]]
name = "Local Llama"
icon = "🦙"

[[custom_models]]
name = "Mistral Large"
color = "text-blue-600"
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.initial_model, "groq");
        assert_eq!(config.reply_delay_ms, 250);
        assert!(config.surface_dispatch_errors);
        assert_eq!(config.default_session_title, "New Chat");
        assert_eq!(config.custom_models.len(), 2);
        assert_eq!(config.custom_models[0].icon.as_deref(), Some("🦙"));
        assert!(config.custom_models[0].color.is_none());
        assert_eq!(
            config.custom_models[1].color.as_deref(),
            Some("text-blue-600")
        );
    }
}
