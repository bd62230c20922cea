//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and map onto the chat intents: session and model
//! management, history, copy and regenerate.

use std::io::{self, Write};

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Exit the chat loop.
    Exit,
    /// Start a new session and switch to it.
    New,
    /// List sessions.
    Sessions,
    /// Switch to a session by list number or id.
    Switch(String),
    /// Delete a session by list number or id.
    Delete(String),
    /// Rename the current session.
    Rename(String),
    /// List models.
    Models,
    /// Select a model by id.
    Model(String),
    /// Register a custom model.
    AddModel(String),
    /// Remove a custom model by id.
    RemoveModel(String),
    /// Show the current session's messages.
    History,
    /// Copy message N of the current session.
    Copy(usize),
    /// Regenerate the reply for message N of the current session.
    Regen(usize),
    /// A known command with a missing or malformed argument.
    Usage(&'static str),
    /// Unknown command.
    Unknown(String),
}

fn required(arg: Option<String>, usage: &'static str, make: fn(String) -> ChatCommand) -> ChatCommand {
    match arg {
        Some(value) if !value.is_empty() => make(value),
        _ => ChatCommand::Usage(usage),
    }
}

fn message_number(arg: Option<String>, usage: &'static str, make: fn(usize) -> ChatCommand) -> ChatCommand {
    match arg.as_deref().map(str::parse::<usize>) {
        Some(Ok(n)) if n > 0 => make(n),
        _ => ChatCommand::Usage(usage),
    }
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts.get(1).map(|s| s.trim().to_string());

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" => ChatCommand::Help,
        "/exit" | "/quit" | "/q" => ChatCommand::Exit,
        "/new" => ChatCommand::New,
        "/sessions" | "/ls" => ChatCommand::Sessions,
        "/switch" | "/s" => required(arg, "/switch <n|id>", ChatCommand::Switch),
        "/delete" | "/rm" => required(arg, "/delete <n|id>", ChatCommand::Delete),
        "/rename" => required(arg, "/rename <title>", ChatCommand::Rename),
        "/models" => ChatCommand::Models,
        "/model" | "/m" => required(arg, "/model <id>", ChatCommand::Model),
        "/add-model" => required(arg, "/add-model <name>", ChatCommand::AddModel),
        "/remove-model" => required(arg, "/remove-model <id>", ChatCommand::RemoveModel),
        "/history" => ChatCommand::History,
        "/copy" => message_number(arg, "/copy <n>", ChatCommand::Copy),
        "/regen" => message_number(arg, "/regen <n>", ChatCommand::Regen),
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

/// Write the help text listing all available commands.
pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    let rows = [
        ("/help", "Show this help message"),
        ("/new", "Start a new session"),
        ("/sessions", "List sessions"),
        ("/switch <n|id>", "Switch to a session"),
        ("/delete <n|id>", "Delete a session"),
        ("/rename <title>", "Rename the current session"),
        ("/models", "List models"),
        ("/model <id>", "Select the model for new messages"),
        ("/add-model <name>", "Register a custom model"),
        ("/remove-model <id>", "Remove a custom model"),
        ("/history", "Show the current session"),
        ("/copy <n>", "Copy message n to the clipboard"),
        ("/regen <n>", "Regenerate the reply to message n"),
        ("/exit", "Leave Parley"),
    ];

    writeln!(out)?;
    writeln!(out, "  {}", style("Available commands:").bold())?;
    writeln!(out)?;
    for (cmd, help) in rows {
        writeln!(out, "  {:<20} {}", style(cmd).cyan(), help)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Replies arrive in the background; keep typing while you wait.").dim()
    )?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_session_commands() {
        assert_eq!(parse("/new"), Some(ChatCommand::New));
        assert_eq!(parse("/sessions"), Some(ChatCommand::Sessions));
        assert_eq!(parse("/switch 2"), Some(ChatCommand::Switch("2".to_string())));
        assert_eq!(parse("/rm 3"), Some(ChatCommand::Delete("3".to_string())));
        assert_eq!(
            parse("/rename  Trip planning "),
            Some(ChatCommand::Rename("Trip planning".to_string()))
        );
    }

    #[test]
    fn test_parse_model_commands() {
        assert_eq!(parse("/models"), Some(ChatCommand::Models));
        assert_eq!(parse("/model groq"), Some(ChatCommand::Model("groq".to_string())));
        assert_eq!(
            parse("/add-model My Model"),
            Some(ChatCommand::AddModel("My Model".to_string()))
        );
        assert_eq!(
            parse("/remove-model my-model"),
            Some(ChatCommand::RemoveModel("my-model".to_string()))
        );
    }

    #[test]
    fn test_parse_message_numbers() {
        assert_eq!(parse("/copy 1"), Some(ChatCommand::Copy(1)));
        assert_eq!(parse("/regen 4"), Some(ChatCommand::Regen(4)));
        assert_eq!(parse("/copy 0"), Some(ChatCommand::Usage("/copy <n>")));
        assert_eq!(parse("/regen x"), Some(ChatCommand::Usage("/regen <n>")));
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(parse("/model"), Some(ChatCommand::Usage("/model <id>")));
        assert_eq!(
            parse("/add-model   "),
            Some(ChatCommand::Usage("/add-model <name>"))
        );
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("hello world"), None);
    }

    #[test]
    fn test_help_lists_every_command() {
        console::set_colors_enabled(false);
        let mut out = Vec::new();
        print_help(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for cmd in ["/new", "/switch", "/add-model", "/copy", "/regen", "/exit"] {
            assert!(text.contains(cmd), "missing {cmd}");
        }
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
