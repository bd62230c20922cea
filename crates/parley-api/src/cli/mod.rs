//! CLI command definitions for the `parley` binary.
//!
//! Running `parley` with no subcommand opens the interactive chat.

pub mod chat;
pub mod models;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Chat with several models across multiple sessions.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed logs (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "PARLEY_OTEL")]
    pub otel: bool,

    /// Override the simulated reply latency in milliseconds.
    #[arg(long, global = true, env = "PARLEY_REPLY_DELAY_MS")]
    pub reply_delay_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Log filter directives for the requested verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,parley=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive chat (default).
    Chat,

    /// List available models.
    Models,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["parley"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn verbosity_maps_to_filter() {
        let cli = Cli::try_parse_from(["parley", "-vv", "models"]).unwrap();
        assert_eq!(cli.log_filter(), "trace");
        assert!(matches!(cli.command, Some(Commands::Models)));

        let cli = Cli::try_parse_from(["parley", "--quiet", "chat"]).unwrap();
        assert_eq!(cli.log_filter(), "error");
    }

    #[test]
    fn reply_delay_override_parses() {
        let cli = Cli::try_parse_from(["parley", "--reply-delay-ms", "0"]).unwrap();
        assert_eq!(cli.reply_delay_ms, Some(0));
    }
}
