//! Main chat loop.
//!
//! The loop reads lines and turns them into chat intents. A background task
//! listens on the event bus and prints replies as they land, so a slow model
//! never blocks the prompt.

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use console::style;
use rustyline_async::SharedWriter;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use parley_core::chat::service::ChatService;
use parley_infra::clipboard::Osc52Clipboard;
use parley_types::chat::{ChatMessage, Sender, SessionId};
use parley_types::event::{ChatEvent, DropReason};
use parley_types::snapshot::ChatSnapshot;

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent, prompt_for};
use super::renderer::{format_message, format_model_row, format_session_row, model_label};

/// Resolve a session reference: a 1-based list position or a full id.
fn resolve_session(snapshot: &ChatSnapshot, reference: &str) -> Option<SessionId> {
    if let Ok(n) = reference.parse::<usize>() {
        return snapshot.sessions.get(n.checked_sub(1)?).map(|s| s.id);
    }
    let id = reference.parse::<SessionId>().ok()?;
    snapshot.session(id).map(|s| s.id)
}

/// Message `n` (1-based) of the current session.
fn message_at(snapshot: &ChatSnapshot, n: usize) -> Option<&ChatMessage> {
    snapshot
        .current_session()?
        .messages
        .get(n.checked_sub(1)?)
}

fn usage_line(usage: &str) -> String {
    format!("  {} Usage: {}", style("?").yellow().bold(), style(usage).cyan())
}

fn current_prompt(snapshot: &ChatSnapshot) -> String {
    let title = snapshot
        .current_session()
        .map(|s| s.title.as_str())
        .unwrap_or_default();
    let icon = snapshot
        .model(&snapshot.selected_model_id)
        .map(|m| m.icon.as_str())
        .unwrap_or_default();
    prompt_for(title, icon)
}

/// Print replies and dropped exchanges until the bus closes.
async fn print_replies(
    mut events: broadcast::Receiver<ChatEvent>,
    snapshots: watch::Receiver<ChatSnapshot>,
    mut out: SharedWriter,
) {
    loop {
        let line = match events.recv().await {
            Ok(ChatEvent::MessageAppended {
                session_id,
                message,
            }) if message.sender() == Sender::Bot => {
                let snapshot = snapshots.borrow().clone();
                let Some(session) = snapshot.session(session_id) else {
                    continue;
                };
                let position = session
                    .messages
                    .iter()
                    .position(|m| m.id() == message.id())
                    .map_or(session.messages.len(), |i| i + 1);

                let mut line = String::new();
                if session_id != snapshot.current_session_id {
                    line.push_str(&format!(
                        "  {}\n",
                        style(format!("(reply in \"{}\")", session.title)).dim()
                    ));
                }
                line.push_str(&format_message(position, &message, &snapshot));
                line
            }
            Ok(ChatEvent::ReplyDropped { model_id, drop, .. }) => {
                let reason = match drop {
                    DropReason::SessionDeleted => "its session was deleted".to_string(),
                    DropReason::DispatchFailed { error } => error,
                };
                format!(
                    "  {} Reply from {model_id} discarded: {reason}",
                    style("!").yellow().bold()
                )
            }
            Ok(_) => continue,
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                debug!(skipped, "Reply printer lagged behind the event bus");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        if writeln!(out, "{line}\n").is_err() {
            break;
        }
    }
}

/// Run one slash command. Returns `false` when the loop should end.
async fn run_command(
    service: &ChatService,
    command: ChatCommand,
    out: &mut SharedWriter,
) -> anyhow::Result<bool> {
    let snapshot = service.snapshot().await;
    let fail = |e: &dyn std::fmt::Display| format!("  {} {e}", style("!").red().bold());

    match command {
        ChatCommand::Help => commands::print_help(out)?,
        ChatCommand::Exit => return Ok(false),
        ChatCommand::New => {
            let session = service.new_session().await;
            writeln!(out, "  Started {}", style(&session.title).cyan().bold())?;
        }
        ChatCommand::Sessions => {
            for (i, session) in snapshot.sessions.iter().enumerate() {
                let current = session.id == snapshot.current_session_id;
                writeln!(out, "{}", format_session_row(i + 1, session, current))?;
            }
        }
        ChatCommand::Switch(reference) => match resolve_session(&snapshot, &reference) {
            Some(id) => {
                service.select_session(id).await?;
                let title = snapshot.session(id).map(|s| s.title.as_str()).unwrap_or_default();
                writeln!(out, "  Switched to {}", style(title).cyan().bold())?;
            }
            None => writeln!(out, "{}", fail(&format!("No session matches '{reference}'")))?,
        },
        ChatCommand::Delete(reference) => match resolve_session(&snapshot, &reference) {
            Some(id) if service.delete_session(id).await => {
                writeln!(out, "  Session deleted")?;
            }
            Some(_) => writeln!(out, "{}", fail(&"The last session can't be deleted"))?,
            None => writeln!(out, "{}", fail(&format!("No session matches '{reference}'")))?,
        },
        ChatCommand::Rename(title) => {
            match service
                .rename_session(snapshot.current_session_id, &title)
                .await
            {
                Ok(()) => writeln!(out, "  Renamed to {}", style(title.trim()).cyan().bold())?,
                Err(e) => writeln!(out, "{}", fail(&e))?,
            }
        }
        ChatCommand::Models => {
            for model in &snapshot.models {
                let selected = model.id == snapshot.selected_model_id;
                writeln!(out, "{}", format_model_row(model, selected))?;
            }
        }
        ChatCommand::Model(id) => match service.select_model(&id).await {
            Ok(model) => writeln!(out, "  Now chatting with {} {}", model.icon, model.name)?,
            Err(e) => writeln!(out, "{}", fail(&e))?,
        },
        ChatCommand::AddModel(name) => match service.add_model(&name).await {
            Ok(model) => writeln!(
                out,
                "  Added {} {} {}",
                model.icon,
                model.name,
                style(format!("({})", model.id)).dim()
            )?,
            Err(e) => writeln!(out, "{}", fail(&e))?,
        },
        ChatCommand::RemoveModel(id) => match service.remove_model(&id).await {
            Ok(true) => writeln!(out, "  Removed {id}")?,
            Ok(false) => writeln!(out, "{}", fail(&format!("No custom model '{id}'")))?,
            Err(e) => writeln!(out, "{}", fail(&e))?,
        },
        ChatCommand::History => match snapshot.current_session() {
            Some(session) if !session.messages.is_empty() => {
                for (i, message) in session.messages.iter().enumerate() {
                    writeln!(out, "{}", format_message(i + 1, message, &snapshot))?;
                }
            }
            _ => writeln!(out, "  {}", style("No messages yet").dim())?,
        },
        ChatCommand::Copy(n) => match message_at(&snapshot, n) {
            Some(message) => match service.copy_message(message.content()) {
                Ok(()) => writeln!(out, "  Copied message {n}")?,
                Err(e) => writeln!(out, "{}", fail(&e))?,
            },
            None => writeln!(out, "{}", fail(&format!("No message {n} in this session")))?,
        },
        ChatCommand::Regen(n) => match message_at(&snapshot, n) {
            Some(message) => match service.regenerate_response(message.id()).await {
                Ok(_) => writeln!(
                    out,
                    "  {} {}",
                    style("Regenerating with").dim(),
                    model_label(Some(&snapshot.selected_model_id), &snapshot)
                )?,
                Err(e) => writeln!(out, "{}", fail(&e))?,
            },
            None => writeln!(out, "{}", fail(&format!("No message {n} in this session")))?,
        },
        ChatCommand::Usage(usage) => writeln!(out, "{}", usage_line(usage))?,
        ChatCommand::Unknown(cmd) => writeln!(
            out,
            "  {} Unknown command: {}. Type /help for available commands.",
            style("?").yellow().bold(),
            style(cmd).dim()
        )?,
    }
    Ok(true)
}

/// Run the interactive chat loop until the user exits.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    let snapshot = state.chat_service.snapshot().await;
    print_welcome_banner(&snapshot, state.chat_service.dispatcher_name());

    let (mut input, mut out) =
        ChatInput::new(current_prompt(&snapshot)).context("Failed to initialize input")?;

    // OSC 52 goes through the shared writer so it doesn't tear the prompt.
    let service = state
        .chat_service
        .clone()
        .with_clipboard(Arc::new(Osc52Clipboard::new(out.clone())));

    let printer = tokio::spawn(print_replies(
        service.events(),
        service.subscribe(),
        out.clone(),
    ));
    info!(dispatcher = service.dispatcher_name(), "Chat loop started");

    loop {
        let text = match input.read_line().await {
            InputEvent::Eof => break,
            InputEvent::Interrupted => {
                writeln!(out, "  {}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                continue;
            }
            InputEvent::Line(text) if text.is_empty() => continue,
            InputEvent::Line(text) => text,
        };

        if let Some(command) = commands::parse(&text) {
            if !run_command(&service, command, &mut out).await? {
                break;
            }
            input.set_prompt(&current_prompt(&service.snapshot().await));
            continue;
        }

        match service.send_message(&text).await {
            Ok(pending) => {
                let snapshot = service.snapshot().await;
                writeln!(
                    out,
                    "  {} {}",
                    style("waiting for").dim(),
                    model_label(Some(pending.model_id()), &snapshot)
                )?;
            }
            Err(e) => writeln!(out, "  {} {e}", style("!").red().bold())?,
        }
    }

    writeln!(out, "\n  {}", style("Session ended.").dim())?;
    printer.abort();
    input.flush();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::chat::state::ChatState;

    fn snapshot_with_sessions(count: usize) -> ChatSnapshot {
        let mut state = ChatState::new();
        for _ in 1..count {
            state.sessions.create_session();
        }
        state.snapshot()
    }

    #[test]
    fn resolve_session_by_position() {
        let snapshot = snapshot_with_sessions(3);
        assert_eq!(
            resolve_session(&snapshot, "2"),
            Some(snapshot.sessions[1].id)
        );
        assert_eq!(resolve_session(&snapshot, "0"), None);
        assert_eq!(resolve_session(&snapshot, "4"), None);
    }

    #[test]
    fn resolve_session_by_id() {
        let snapshot = snapshot_with_sessions(2);
        let id = snapshot.sessions[0].id;
        assert_eq!(resolve_session(&snapshot, &id.to_string()), Some(id));
        assert_eq!(resolve_session(&snapshot, &SessionId::new().to_string()), None);
        assert_eq!(resolve_session(&snapshot, "not-an-id"), None);
    }

    #[test]
    fn missing_argument_prints_usage() {
        console::set_colors_enabled(false);
        let Some(ChatCommand::Usage(usage)) = commands::parse("/model") else {
            panic!("expected a usage error");
        };
        let line = usage_line(usage);
        assert_eq!(line, "  ? Usage: /model <id>");
        assert!(!line.contains("Unknown"));
    }

    #[test]
    fn message_at_is_one_based() {
        let mut state = ChatState::new();
        let id = state.sessions.current_id();
        state
            .sessions
            .append_message(id, ChatMessage::user("first"))
            .unwrap();
        let snapshot = state.snapshot();

        assert_eq!(message_at(&snapshot, 1).map(|m| m.content()), Some("first"));
        assert!(message_at(&snapshot, 0).is_none());
        assert!(message_at(&snapshot, 2).is_none());
    }
}
