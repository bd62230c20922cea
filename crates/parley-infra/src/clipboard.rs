//! Terminal clipboard using the OSC 52 escape sequence.
//!
//! Terminals that support OSC 52 (most modern emulators, tmux with
//! `set-clipboard on`) place the base64 payload on the system clipboard.
//! Terminals that don't simply ignore the sequence.

use std::io::Write;
use std::sync::Mutex;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use parley_core::clipboard::Clipboard;
use parley_types::error::ClipboardError;

/// Build the OSC 52 sequence that sets the clipboard to `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

/// Clipboard that writes OSC 52 sequences to a terminal stream.
pub struct Osc52Clipboard<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the underlying writer.
    pub fn into_inner(self) -> Result<W, ClipboardError> {
        self.out
            .into_inner()
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    /// Clipboard writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Clipboard for Osc52Clipboard<W> {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut out = self
            .out
            .lock()
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_encodes_payload() {
        assert_eq!(osc52_sequence("hello"), "\x1b]52;c;aGVsbG8=\x07");
    }

    #[test]
    fn write_text_emits_sequence() {
        let clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("hi").unwrap();
        let written = clipboard.into_inner().unwrap();
        assert_eq!(String::from_utf8(written).unwrap(), "\x1b]52;c;aGk=\x07");
    }
}
