use thiserror::Error;

use crate::chat::{MessageId, SessionId};

/// Errors from model registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("model name must not be empty")]
    InvalidModelName,

    #[error("model id '{0}' already exists")]
    DuplicateModelId(String),

    #[error("model '{0}' is built in and cannot be removed")]
    ModelNotRemovable(String),

    #[error("model '{0}' not found")]
    ModelNotFound(String),
}

/// Errors from session store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session {0} not found")]
    SessionNotFound(SessionId),

    #[error("session title must not be empty")]
    InvalidTitle,
}

/// Errors from the clipboard collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Errors surfaced by chat intents (send, regenerate, copy, ...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("message must not be empty")]
    EmptyMessage,

    #[error("message {0} not found")]
    MessageNotFound(MessageId),

    #[error("no user prompt precedes message {0}")]
    NoPromptForMessage(MessageId),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_display() {
        let err = ModelError::DuplicateModelId("my-model".to_string());
        assert_eq!(err.to_string(), "model id 'my-model' already exists");
    }

    #[test]
    fn test_chat_error_wraps_session_error() {
        let id = SessionId::new();
        let err: ChatError = SessionError::SessionNotFound(id).into();
        assert_eq!(err, ChatError::Session(SessionError::SessionNotFound(id)));
        assert_eq!(err.to_string(), format!("session {id} not found"));
    }

    #[test]
    fn test_chat_error_wraps_model_error() {
        let err: ChatError = ModelError::ModelNotRemovable("openai".to_string()).into();
        assert!(err.to_string().contains("openai"));
    }
}
