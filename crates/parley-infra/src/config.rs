//! Global configuration loader for Parley.
//!
//! Reads `config.toml` from the data directory (`~/.parley/` by default)
//! and deserializes it into [`GlobalConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use parley_types::config::GlobalConfig;

/// Upper bound on the simulated reply latency.
const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `PARLEY_DATA_DIR` environment variable
/// 2. `~/.parley`
/// 3. `.parley` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PARLEY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".parley");
    }

    PathBuf::from(".parley")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            GlobalConfig::default()
        }
    }
}

/// Resolve the simulated reply latency, capped at one minute.
pub fn resolve_reply_delay(config: &GlobalConfig) -> Duration {
    Duration::from_millis(config.reply_delay_ms.min(MAX_REPLY_DELAY_MS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_global_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.initial_model, "openai");
        assert_eq!(config.reply_delay_ms, 1_000);
        assert!(config.custom_models.is_empty());
    }

    #[tokio::test]
    async fn load_global_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
initial_model = "gemini"
reply_delay_ms = 10

[[custom_models]]
name = "Local Llama"
"#,
        )
        .await
        .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.initial_model, "gemini");
        assert_eq!(config.reply_delay_ms, 10);
        assert_eq!(config.custom_models.len(), 1);
        assert_eq!(config.custom_models[0].name, "Local Llama");
    }

    #[tokio::test]
    async fn load_global_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_global_config(tmp.path()).await;
        assert_eq!(config.initial_model, "openai");
        assert!(!config.surface_dispatch_errors);
    }

    #[test]
    fn resolve_reply_delay_caps_latency() {
        let mut config = GlobalConfig::default();
        assert_eq!(resolve_reply_delay(&config), Duration::from_millis(1_000));

        config.reply_delay_ms = 10_000_000;
        assert_eq!(
            resolve_reply_delay(&config),
            Duration::from_millis(MAX_REPLY_DELAY_MS)
        );
    }
}
