//! Request and error types for the response dispatcher boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chat::SessionId;

/// Everything a dispatcher needs to produce one reply.
///
/// `model_id` and `model_name` are captured when the message is sent and are
/// never re-resolved, so a reply is attributed to the model that was active
/// at send time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub session_id: SessionId,
    pub model_id: String,
    pub model_name: String,
    pub text: String,
}

/// Errors returned by a dispatcher backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("backend error: {0}")]
    Backend(String),

    #[error("dispatcher unavailable")]
    Unavailable,
}
