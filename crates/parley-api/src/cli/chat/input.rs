//! Async line input for the chat loop.
//!
//! Replies arrive while the user is typing, so output goes through the
//! `SharedWriter` handed out alongside the reader; it redraws the prompt
//! after each write.

use console::style;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};

/// What the user did at the prompt.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// A submitted line, trimmed.
    Line(String),
    /// Ctrl+D or a closed terminal.
    Eof,
    /// Ctrl+C.
    Interrupted,
}

/// Prompt text showing the current session and model.
pub fn prompt_for(session_title: &str, model_icon: &str) -> String {
    format!(
        "{} {} {} ",
        style(session_title).cyan(),
        model_icon,
        style(">").green().bold()
    )
}

pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create the reader and the writer used for all chat output.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, writer) = Readline::new(prompt)?;
        Ok((Self { rl }, writer))
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        if let Err(e) = self.rl.update_prompt(prompt) {
            tracing::debug!(error = %e, "Failed to update prompt");
        }
    }

    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    self.rl.add_history_entry(line.clone());
                }
                InputEvent::Line(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                tracing::debug!(error = %e, "Readline closed");
                InputEvent::Eof
            }
        }
    }

    /// Restore the terminal before exit.
    pub fn flush(&mut self) {
        if let Err(e) = self.rl.flush() {
            tracing::debug!(error = %e, "Failed to flush readline");
        }
    }
}
