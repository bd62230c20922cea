//! Clipboard port used by the copy intent.
//!
//! Copying is a pass-through: the core hands message text to whatever
//! clipboard the presentation layer provides and keeps no state about it.

use std::sync::Mutex;

use parley_types::error::ClipboardError;

/// Destination for copied message text.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard that remembers the last copied text.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        *contents = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard for environments without one; every write fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }
}
