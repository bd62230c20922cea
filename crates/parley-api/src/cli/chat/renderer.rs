//! Line formatting for sessions, models and messages.
//!
//! Model colors are stored as palette classes such as `text-green-600`; the
//! hue is mapped onto the nearest terminal color.

use console::{Color, style};
use parley_types::chat::{ChatMessage, ChatSession, Sender};
use parley_types::model::{DEFAULT_CUSTOM_ICON, ModelEntry};
use parley_types::snapshot::ChatSnapshot;

/// Longest preview shown in session listings.
const PREVIEW_CHARS: usize = 48;

/// Map a palette class like `text-purple-600` to a terminal color.
pub fn terminal_color(class: &str) -> Color {
    let hue = class
        .strip_prefix("text-")
        .and_then(|rest| rest.split('-').next())
        .unwrap_or_default();
    match hue {
        "red" | "rose" => Color::Red,
        "green" | "emerald" | "lime" => Color::Green,
        "yellow" | "amber" | "orange" => Color::Yellow,
        "blue" | "sky" | "indigo" => Color::Blue,
        "purple" | "violet" | "fuchsia" | "pink" => Color::Magenta,
        "cyan" | "teal" => Color::Cyan,
        _ => Color::White,
    }
}

/// Label for the model that produced a reply.
///
/// A reply can outlive its model's registry entry, so unknown ids fall back
/// to the default icon and the raw id.
pub fn model_label(model_id: Option<&str>, snapshot: &ChatSnapshot) -> String {
    let Some(id) = model_id else {
        return format!("{DEFAULT_CUSTOM_ICON} Bot");
    };
    match snapshot.model(id) {
        Some(model) => format!(
            "{} {}",
            model.icon,
            style(&model.name).fg(terminal_color(&model.color)).bold()
        ),
        None => format!("{DEFAULT_CUSTOM_ICON} {}", style(id).dim()),
    }
}

/// Render one message with its position in the session.
pub fn format_message(index: usize, message: &ChatMessage, snapshot: &ChatSnapshot) -> String {
    let time = message.timestamp().format("%H:%M");
    let who = match message.sender() {
        Sender::User => format!("{}", style("You").green().bold()),
        Sender::Bot => model_label(message.model(), snapshot),
    };
    format!(
        "  {} {} {}\n    {}",
        style(format!("[{index}]")).dim(),
        who,
        style(time).dim(),
        message.content()
    )
}

fn preview(session: &ChatSession) -> String {
    let Some(last) = session.messages.last() else {
        return "No messages yet".to_string();
    };
    let mut text: String = last.content().chars().take(PREVIEW_CHARS).collect();
    if last.content().chars().count() > PREVIEW_CHARS {
        text.push_str("...");
    }
    text
}

/// Render one row of the session list.
pub fn format_session_row(index: usize, session: &ChatSession, is_current: bool) -> String {
    let marker = if is_current { ">" } else { " " };
    let title = if is_current {
        style(&session.title).cyan().bold()
    } else {
        style(&session.title).bold()
    };
    format!(
        " {} {} {}  {}  {}",
        style(marker).cyan().bold(),
        style(format!("{index}.")).dim(),
        title,
        style(format!("{} msgs", session.messages.len())).dim(),
        style(preview(session)).dim()
    )
}

/// Render one row of the model list.
pub fn format_model_row(model: &ModelEntry, is_selected: bool) -> String {
    let marker = if is_selected { ">" } else { " " };
    let kind = if model.is_custom { "custom" } else { "built-in" };
    format!(
        " {} {} {}  {}  {}",
        style(marker).cyan().bold(),
        model.icon,
        style(&model.name).fg(terminal_color(&model.color)).bold(),
        style(&model.id).dim(),
        style(kind).dim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::ChatSession;
    use parley_types::model::builtin_models;

    fn snapshot_with_builtins() -> ChatSnapshot {
        let session = ChatSession::new("New Chat");
        ChatSnapshot {
            current_session_id: session.id,
            sessions: vec![session],
            models: builtin_models(),
            selected_model_id: "openai".to_string(),
        }
    }

    #[test]
    fn palette_classes_map_to_terminal_colors() {
        assert_eq!(terminal_color("text-green-600"), Color::Green);
        assert_eq!(terminal_color("text-orange-600"), Color::Yellow);
        assert_eq!(terminal_color("text-purple-600"), Color::Magenta);
        assert_eq!(terminal_color("text-gray-600"), Color::White);
        assert_eq!(terminal_color("not-a-class"), Color::White);
    }

    #[test]
    fn model_label_falls_back_for_removed_model() {
        console::set_colors_enabled(false);
        let snapshot = snapshot_with_builtins();
        assert_eq!(model_label(Some("groq"), &snapshot), "⚡ Groq");
        assert_eq!(model_label(Some("gone"), &snapshot), "🤖 gone");
        assert_eq!(model_label(None, &snapshot), "🤖 Bot");
    }

    #[test]
    fn message_line_includes_index_and_content() {
        console::set_colors_enabled(false);
        let snapshot = snapshot_with_builtins();
        let line = format_message(2, &ChatMessage::bot("hi there", "gemini"), &snapshot);
        assert!(line.contains("[2]"));
        assert!(line.contains("✨ Gemini"));
        assert!(line.ends_with("hi there"));
    }

    #[test]
    fn session_row_previews_last_message() {
        console::set_colors_enabled(false);
        let mut session = ChatSession::new("Trip");
        assert!(format_session_row(1, &session, false).contains("No messages yet"));

        session.messages.push(ChatMessage::user("x".repeat(60)));
        let row = format_session_row(1, &session, true);
        assert!(row.contains("1 msgs"));
        assert!(row.contains(&format!("{}...", "x".repeat(PREVIEW_CHARS))));
    }
}
