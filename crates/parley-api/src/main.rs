//! Parley CLI entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then runs the
//! interactive chat or one of the listing commands.

mod cli;
mod state;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    parley_observe::tracing_setup::init_tracing(cli.log_filter(), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = Cli::command();
        generate(*shell, &mut cmd, "parley", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.reply_delay_ms).await?;

    let result = match cli.command {
        None | Some(Commands::Chat) => cli::chat::loop_runner::run_chat_loop(&state).await,
        Some(Commands::Models) => cli::models::list_models(&state, cli.json).await,
        Some(Commands::Completions { .. }) => unreachable!("handled above"),
    };

    parley_observe::tracing_setup::shutdown_tracing();
    result
}
