//! Session store: owns every chat session and tracks the current one.
//!
//! The store never holds zero sessions. Messages are appended to a session
//! by id, independent of which session is current, so replies that arrive
//! late still land in the conversation that asked for them.

use parley_types::chat::{ChatMessage, ChatSession, MessageId, SessionId};
use parley_types::error::SessionError;
use tracing::{debug, info};

/// Default title for newly created sessions.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// Ordered collection of sessions plus the current-session pointer.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Vec<ChatSession>,
    current: SessionId,
    default_title: String,
}

impl SessionStore {
    /// Create a store holding a single empty session, which is current.
    pub fn new() -> Self {
        Self::with_default_title(DEFAULT_SESSION_TITLE)
    }

    /// Create a store whose sessions start with `title`.
    pub fn with_default_title(title: impl Into<String>) -> Self {
        let default_title = title.into();
        let session = ChatSession::new(default_title.clone());
        Self {
            current: session.id,
            sessions: vec![session],
            default_title,
        }
    }

    /// All sessions in store (creation) order.
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: SessionId) -> Result<&mut ChatSession, SessionError> {
        self.sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(SessionError::SessionNotFound(id))
    }

    pub fn current_id(&self) -> SessionId {
        self.current
    }

    /// The current session.
    pub fn current(&self) -> &ChatSession {
        // `current` always names a live session; fall back to the first one
        // rather than panicking if that ever stops holding.
        self.get(self.current).unwrap_or(&self.sessions[0])
    }

    /// Create an empty session and make it current.
    pub fn create_session(&mut self) -> &ChatSession {
        let session = ChatSession::new(self.default_title.clone());
        let id = session.id;
        self.sessions.push(session);
        self.current = id;
        info!(session_id = %id, "Session created");
        &self.sessions[self.sessions.len() - 1]
    }

    /// Delete a session.
    ///
    /// Deleting the last remaining session, or an unknown id, is a silent
    /// no-op. If the deleted session was current, the first remaining
    /// session in store order becomes current. Returns whether a session was
    /// removed.
    pub fn delete_session(&mut self, id: SessionId) -> bool {
        if self.sessions.len() <= 1 {
            debug!(session_id = %id, "Refusing to delete the last session");
            return false;
        }
        let Some(pos) = self.sessions.iter().position(|s| s.id == id) else {
            debug!(session_id = %id, "Ignoring deletion of unknown session");
            return false;
        };

        self.sessions.remove(pos);
        if self.current == id {
            self.current = self.sessions[0].id;
        }
        info!(session_id = %id, current = %self.current, "Session deleted");
        true
    }

    /// Make `id` the current session.
    pub fn select_session(&mut self, id: SessionId) -> Result<(), SessionError> {
        if self.get(id).is_none() {
            return Err(SessionError::SessionNotFound(id));
        }
        self.current = id;
        Ok(())
    }

    /// Rename a session. Titles are trimmed and must not be blank.
    pub fn rename_session(&mut self, id: SessionId, title: &str) -> Result<(), SessionError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SessionError::InvalidTitle);
        }
        self.get_mut(id)?.title = title.to_string();
        Ok(())
    }

    /// Append a message to `session_id`, whether or not it is current.
    pub fn append_message(
        &mut self,
        session_id: SessionId,
        message: ChatMessage,
    ) -> Result<(), SessionError> {
        self.get_mut(session_id)?.messages.push(message);
        Ok(())
    }

    /// Find a message anywhere in the store, returning it with its session.
    pub fn find_message(&self, id: MessageId) -> Option<(&ChatSession, &ChatMessage)> {
        self.sessions
            .iter()
            .find_map(|s| s.message(id).map(|m| (s, m)))
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
