//! Application state wiring the chat service to its collaborators.
//!
//! AppState loads `config.toml`, seeds the chat state from it and pins the
//! service to the simulated dispatcher and the OSC 52 clipboard.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parley_core::chat::service::ChatService;
use parley_core::chat::state::ChatState;
use parley_core::dispatch::box_dispatcher::BoxDispatcher;
use parley_core::dispatch::simulated::SimulatedDispatcher;
use parley_infra::clipboard::Osc52Clipboard;
use parley_infra::config::{load_global_config, resolve_data_dir, resolve_reply_delay};
use parley_types::config::GlobalConfig;

/// Shared application state used by every command.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: ChatService,
    pub config: GlobalConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load configuration from the data directory and wire the chat service.
    ///
    /// `reply_delay_ms` overrides the configured simulated latency.
    pub async fn init(reply_delay_ms: Option<u64>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let mut config = load_global_config(&data_dir).await;
        if let Some(ms) = reply_delay_ms {
            config.reply_delay_ms = ms;
        }
        Ok(Self::from_config(config, data_dir))
    }

    pub fn from_config(config: GlobalConfig, data_dir: PathBuf) -> Self {
        let delay: Duration = resolve_reply_delay(&config);
        let dispatcher = BoxDispatcher::new(SimulatedDispatcher::new(delay));
        let chat_service = ChatService::new(ChatState::from_config(&config), dispatcher)
            .with_surface_dispatch_errors(config.surface_dispatch_errors)
            .with_clipboard(Arc::new(Osc52Clipboard::stdout()));

        tracing::debug!(
            data_dir = %data_dir.display(),
            reply_delay_ms = delay.as_millis() as u64,
            models = config.custom_models.len(),
            "Application state ready"
        );

        Self {
            chat_service,
            config,
            data_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::config::CustomModelConfig;
    use parley_types::event::ExchangeState;

    #[tokio::test]
    async fn state_seeds_models_and_selection_from_config() {
        let config = GlobalConfig {
            initial_model: "local-llama".to_string(),
            reply_delay_ms: 0,
            custom_models: vec![CustomModelConfig {
                name: "Local Llama".to_string(),
                icon: None,
                color: None,
            }],
            ..GlobalConfig::default()
        };
        let state = AppState::from_config(config, PathBuf::from("/tmp/parley-test"));

        let snapshot = state.chat_service.snapshot().await;
        assert_eq!(snapshot.models.len(), 4);
        assert_eq!(snapshot.selected_model_id, "local-llama");

        let outcome = state
            .chat_service
            .send_message("hello")
            .await
            .unwrap()
            .outcome()
            .await;
        assert_eq!(outcome.state(), ExchangeState::Delivered);
        assert!(outcome.message().unwrap().content().contains("Local Llama"));
    }

    #[tokio::test]
    async fn init_reads_data_dir_from_env() {
        let tmp = tempfile::TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "default_session_title = \"Scratch\"\n",
        )
        .await
        .unwrap();

        // SAFETY: only this test touches PARLEY_DATA_DIR.
        unsafe { std::env::set_var("PARLEY_DATA_DIR", tmp.path()) };
        let state = AppState::init(Some(0)).await.unwrap();
        unsafe { std::env::remove_var("PARLEY_DATA_DIR") };

        assert_eq!(state.data_dir, tmp.path());
        assert_eq!(state.config.reply_delay_ms, 0);
        let snapshot = state.chat_service.snapshot().await;
        assert_eq!(snapshot.current_session().unwrap().title, "Scratch");
    }
}
