//! Chat session and message types for Parley.
//!
//! A session is an independent, ordered conversation thread. Messages inside
//! it are appended in chronological order and never reordered or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

/// Unique identifier for a chat session, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new SessionId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a message.
///
/// UUID v7 ids stay distinct for messages created within the same clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single message within a chat session.
///
/// Fields are private so the sender/model pairing cannot be broken after
/// construction: user messages never carry a model, bot messages always do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    id: MessageId,
    content: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
}

impl ChatMessage {
    /// Build a message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            model: None,
        }
    }

    /// Build a reply produced by the model registered under `model`.
    pub fn bot(content: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            content: content.into(),
            sender: Sender::Bot,
            timestamp: Utc::now(),
            model: Some(model.into()),
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Registry id of the model that produced this reply (bot messages only).
    ///
    /// The id is kept even if the model is later removed from the registry.
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
}

/// A chat session: a titled, ordered list of messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create an empty session with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            title: title.into(),
            messages: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Look up a message in this session by id.
    pub fn message(&self, id: MessageId) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let parsed: Sender = sender.to_string().parse().unwrap();
            assert_eq!(sender, parsed);
        }
        assert!("assistant".parse::<Sender>().is_err());
    }

    #[test]
    fn test_user_message_has_no_model() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.sender(), Sender::User);
        assert_eq!(msg.model(), None);
        assert_eq!(msg.content(), "hello");
    }

    #[test]
    fn test_bot_message_carries_model() {
        let msg = ChatMessage::bot("hi there", "openai");
        assert_eq!(msg.sender(), Sender::Bot);
        assert_eq!(msg.model(), Some("openai"));
    }

    #[test]
    fn test_ids_distinct_within_same_tick() {
        let ids: Vec<MessageId> = (0..1000).map(|_| ChatMessage::user("x").id()).collect();
        let mut deduped = ids.clone();
        deduped.sort_by_key(|id| id.0);
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_session_id_parse() {
        let id = SessionId::new();
        let parsed: SessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_message_serializes_without_model() {
        let json = serde_json::to_string(&ChatMessage::user("hello")).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(!json.contains("\"model\""));
    }

    #[test]
    fn test_session_message_lookup() {
        let mut session = ChatSession::new("New Chat");
        let msg = ChatMessage::user("find me");
        let id = msg.id();
        session.messages.push(msg);
        assert_eq!(session.message(id).map(|m| m.content()), Some("find me"));
        assert!(session.message(MessageId::new()).is_none());
    }
}
