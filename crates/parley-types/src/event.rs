//! Event types for the Parley chat event bus.
//!
//! `ChatEvent` is broadcast after each state mutation so a presentation
//! layer can react to discrete changes (most importantly, a bot reply
//! arriving for a session that may no longer be on screen).

use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, SessionId};
use crate::model::ModelEntry;

/// Lifecycle of a single send/reply exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeState {
    Composed,
    Sent,
    AwaitingReply,
    Delivered,
    Dropped,
}

/// Why a reply never reached its session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DropReason {
    /// The originating session was deleted while the reply was in flight.
    SessionDeleted,
    /// The dispatcher failed to produce a reply.
    DispatchFailed { error: String },
}

/// Terminal result of an exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ExchangeOutcome {
    Delivered { message: ChatMessage },
    Dropped { drop: DropReason },
}

impl ExchangeOutcome {
    pub fn state(&self) -> ExchangeState {
        match self {
            ExchangeOutcome::Delivered { .. } => ExchangeState::Delivered,
            ExchangeOutcome::Dropped { .. } => ExchangeState::Dropped,
        }
    }

    /// The delivered bot message, if any.
    pub fn message(&self) -> Option<&ChatMessage> {
        match self {
            ExchangeOutcome::Delivered { message } => Some(message),
            ExchangeOutcome::Dropped { .. } => None,
        }
    }
}

/// Events emitted whenever chat state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    SessionCreated { session_id: SessionId },
    SessionDeleted { session_id: SessionId },
    SessionSelected { session_id: SessionId },
    SessionRenamed { session_id: SessionId, title: String },

    /// A user or bot message was appended to `session_id`.
    MessageAppended {
        session_id: SessionId,
        message: ChatMessage,
    },

    /// A reply for `session_id` was discarded.
    ReplyDropped {
        session_id: SessionId,
        model_id: String,
        drop: DropReason,
    },

    ModelSelected { model_id: String },
    ModelAdded { model: ModelEntry },
    ModelRemoved { model_id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_state_serde() {
        let json = serde_json::to_string(&ExchangeState::AwaitingReply).unwrap();
        assert_eq!(json, "\"awaiting_reply\"");
    }

    #[test]
    fn test_outcome_state() {
        let delivered = ExchangeOutcome::Delivered {
            message: ChatMessage::bot("hi", "openai"),
        };
        assert_eq!(delivered.state(), ExchangeState::Delivered);
        assert!(delivered.message().is_some());

        let dropped = ExchangeOutcome::Dropped {
            drop: DropReason::SessionDeleted,
        };
        assert_eq!(dropped.state(), ExchangeState::Dropped);
        assert!(dropped.message().is_none());
    }

    #[test]
    fn test_chat_event_tagged_serialize() {
        let event = ChatEvent::ModelRemoved {
            model_id: "my-model".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"model_removed\""));
    }
}
