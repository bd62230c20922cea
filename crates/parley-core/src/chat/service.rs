//! Chat service: the message pipeline and intent surface of Parley.
//!
//! ChatService owns the `ChatState` behind a single async mutex and turns
//! presentation intents into state mutations. Sending a message appends the
//! user message immediately, then hands the text to the dispatcher on a
//! spawned task. The reply is appended to the session that sent it, even if
//! the user has moved to another session meanwhile. If that session is gone
//! by the time the reply arrives, the reply is dropped.
//!
//! The lock is never held across the dispatcher await, so session and model
//! intents are never blocked by an outstanding reply. Snapshots and events
//! are published while the lock is held, so subscribers see them in the
//! order the mutations happened.

use std::sync::Arc;

use parley_types::chat::{ChatMessage, ChatSession, MessageId, Sender, SessionId};
use parley_types::dispatch::{DispatchError, DispatchRequest};
use parley_types::error::{ChatError, ModelError};
use parley_types::event::{ChatEvent, DropReason, ExchangeOutcome, ExchangeState};
use parley_types::model::ModelEntry;
use parley_types::snapshot::ChatSnapshot;
use tokio::sync::{Mutex, MutexGuard, broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::chat::state::ChatState;
use crate::clipboard::{Clipboard, NoClipboard};
use crate::dispatch::box_dispatcher::BoxDispatcher;

/// Capacity of the chat event channel.
const EVENT_CAPACITY: usize = 256;

/// Handle to a reply that is being generated.
#[derive(Debug)]
pub struct PendingReply {
    session_id: SessionId,
    model_id: String,
    handle: JoinHandle<ExchangeOutcome>,
}

impl PendingReply {
    /// Session the reply will be appended to.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Model captured when the message was sent.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Whether the exchange has reached `Delivered` or `Dropped`.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the exchange to finish.
    pub async fn outcome(self) -> ExchangeOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) => ExchangeOutcome::Dropped {
                drop: DropReason::DispatchFailed {
                    error: e.to_string(),
                },
            },
        }
    }
}

/// Orchestrates chat state mutations and reply dispatch.
///
/// Cloning is cheap; clones share the same state, dispatcher and channels.
#[derive(Clone)]
pub struct ChatService {
    state: Arc<Mutex<ChatState>>,
    dispatcher: Arc<BoxDispatcher>,
    clipboard: Arc<dyn Clipboard>,
    events: broadcast::Sender<ChatEvent>,
    snapshots: Arc<watch::Sender<ChatSnapshot>>,
    surface_dispatch_errors: bool,
}

impl ChatService {
    /// Create a chat service over `state`, replying through `dispatcher`.
    pub fn new(state: ChatState, dispatcher: BoxDispatcher) -> Self {
        let (snapshots, _) = watch::channel(state.snapshot());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(state)),
            dispatcher: Arc::new(dispatcher),
            clipboard: Arc::new(NoClipboard),
            events,
            snapshots: Arc::new(snapshots),
            surface_dispatch_errors: false,
        }
    }

    /// Use `clipboard` for the copy intent.
    pub fn with_clipboard(mut self, clipboard: Arc<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    /// Append a bot message describing dispatcher failures instead of
    /// dropping the reply.
    pub fn with_surface_dispatch_errors(mut self, enabled: bool) -> Self {
        self.surface_dispatch_errors = enabled;
        self
    }

    /// Name of the dispatcher backend.
    pub fn dispatcher_name(&self) -> &str {
        self.dispatcher.name()
    }

    // --- Observation ---

    /// Current state, copied for rendering.
    pub async fn snapshot(&self) -> ChatSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Receiver that always holds the snapshot taken after the latest mutation.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.snapshots.subscribe()
    }

    /// Receiver for discrete state-change events.
    pub fn events(&self) -> broadcast::Receiver<ChatEvent> {
        self.events.subscribe()
    }

    fn publish_snapshot(&self, state: &MutexGuard<'_, ChatState>) {
        self.snapshots.send_replace(state.snapshot());
    }

    /// Publish a snapshot and then `event`. Callers hold the state guard.
    fn commit(&self, state: &MutexGuard<'_, ChatState>, event: ChatEvent) {
        self.publish_snapshot(state);
        self.publish(event);
    }

    fn publish(&self, event: ChatEvent) {
        // Err only means nobody is listening.
        let _ = self.events.send(event);
    }

    // --- Session intents ---

    /// Create a session and make it current.
    pub async fn new_session(&self) -> ChatSession {
        let mut state = self.state.lock().await;
        let session = state.sessions.create_session().clone();
        self.commit(
            &state,
            ChatEvent::SessionCreated {
                session_id: session.id,
            },
        );
        session
    }

    /// Delete a session. The last remaining session is never deleted.
    pub async fn delete_session(&self, id: SessionId) -> bool {
        let mut state = self.state.lock().await;
        let deleted = state.sessions.delete_session(id);
        if deleted {
            self.commit(&state, ChatEvent::SessionDeleted { session_id: id });
        }
        deleted
    }

    pub async fn select_session(&self, id: SessionId) -> Result<(), ChatError> {
        let mut state = self.state.lock().await;
        state.sessions.select_session(id)?;
        self.commit(&state, ChatEvent::SessionSelected { session_id: id });
        Ok(())
    }

    pub async fn rename_session(&self, id: SessionId, title: &str) -> Result<(), ChatError> {
        let mut state = self.state.lock().await;
        state.sessions.rename_session(id, title)?;
        let title = state
            .sessions
            .get(id)
            .map(|s| s.title.clone())
            .unwrap_or_default();
        info!(session_id = %id, title = %title, "Session renamed");
        self.commit(&state, ChatEvent::SessionRenamed { session_id: id, title });
        Ok(())
    }

    // --- Model intents ---

    pub async fn select_model(&self, id: &str) -> Result<ModelEntry, ChatError> {
        let mut state = self.state.lock().await;
        let model = state.models.select_model(id)?.clone();
        self.commit(
            &state,
            ChatEvent::ModelSelected {
                model_id: model.id.clone(),
            },
        );
        Ok(model)
    }

    pub async fn add_model(&self, name: &str) -> Result<ModelEntry, ChatError> {
        let mut state = self.state.lock().await;
        let model = state.models.add_custom_model(name)?;
        self.commit(
            &state,
            ChatEvent::ModelAdded {
                model: model.clone(),
            },
        );
        Ok(model)
    }

    /// Remove a custom model; removing the selected one resets the selection.
    pub async fn remove_model(&self, id: &str) -> Result<bool, ChatError> {
        let mut state = self.state.lock().await;
        let was_selected = state.models.selected_id() == id;
        let removed = state.models.remove_custom_model(id)?;
        if removed {
            self.commit(
                &state,
                ChatEvent::ModelRemoved {
                    model_id: id.to_string(),
                },
            );
            if was_selected {
                self.publish(ChatEvent::ModelSelected {
                    model_id: state.models.selected_id().to_string(),
                });
            }
        }
        Ok(removed)
    }

    // --- Message pipeline ---

    /// Send `text` on the current session with the selected model.
    pub async fn send_message(&self, text: &str) -> Result<PendingReply, ChatError> {
        let (session_id, model_id) = {
            let state = self.state.lock().await;
            (
                state.sessions.current_id(),
                state.models.selected_id().to_string(),
            )
        };
        self.send(session_id, text, &model_id).await
    }

    /// Append a user message to `session_id` and dispatch it to `model_id`.
    ///
    /// Blank text is rejected before anything changes. The user message is
    /// visible as soon as this returns; the reply arrives later through the
    /// returned handle, the event channel and the snapshot channel.
    pub async fn send(
        &self,
        session_id: SessionId,
        text: &str,
        model_id: &str,
    ) -> Result<PendingReply, ChatError> {
        debug!(
            session_id = %session_id,
            model = %model_id,
            state = ?ExchangeState::Composed,
            "Message composed"
        );
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = ChatMessage::user(text);
        let request = {
            let mut state = self.state.lock().await;
            let model = state
                .models
                .resolve(model_id)
                .cloned()
                .ok_or_else(|| ModelError::ModelNotFound(model_id.to_string()))?;
            state.sessions.append_message(session_id, message.clone())?;
            debug!(session_id = %session_id, state = ?ExchangeState::Sent, "User message appended");
            self.commit(
                &state,
                ChatEvent::MessageAppended {
                    session_id,
                    message,
                },
            );

            DispatchRequest {
                session_id,
                model_id: model.id,
                model_name: model.name,
                text: text.to_string(),
            }
        };
        Ok(self.dispatch(request))
    }

    /// Ask for a fresh reply to an earlier prompt.
    ///
    /// For a user message its own text is re-sent; for a bot message the
    /// nearest preceding user message in the same session is used. The
    /// currently selected model answers, and the new reply is appended after
    /// the existing history.
    pub async fn regenerate_response(
        &self,
        message_id: MessageId,
    ) -> Result<PendingReply, ChatError> {
        let request = {
            let state = self.state.lock().await;
            let (session, message) = state
                .sessions
                .find_message(message_id)
                .ok_or(ChatError::MessageNotFound(message_id))?;

            let prompt = match message.sender() {
                Sender::User => message.content().to_string(),
                Sender::Bot => session
                    .messages
                    .iter()
                    .take_while(|m| m.id() != message_id)
                    .filter(|m| m.sender() == Sender::User)
                    .last()
                    .map(|m| m.content().to_string())
                    .ok_or(ChatError::NoPromptForMessage(message_id))?,
            };

            let model = state.models.selected();
            DispatchRequest {
                session_id: session.id,
                model_id: model.id.clone(),
                model_name: model.name.clone(),
                text: prompt,
            }
        };

        info!(message_id = %message_id, model = %request.model_id, "Regenerating response");
        Ok(self.dispatch(request))
    }

    /// Copy message text to the clipboard collaborator.
    pub fn copy_message(&self, content: &str) -> Result<(), ChatError> {
        self.clipboard.write_text(content)?;
        Ok(())
    }

    fn dispatch(&self, request: DispatchRequest) -> PendingReply {
        let session_id = request.session_id;
        let model_id = request.model_id.clone();
        let service = self.clone();
        let handle = tokio::spawn(async move { service.complete(request).await });

        PendingReply {
            session_id,
            model_id,
            handle,
        }
    }

    async fn complete(&self, request: DispatchRequest) -> ExchangeOutcome {
        debug!(
            session_id = %request.session_id,
            model = %request.model_id,
            dispatcher = self.dispatcher.name(),
            state = ?ExchangeState::AwaitingReply,
            "Dispatching"
        );

        let content = match self.dispatcher.invoke(&request).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                return self
                    .fail(&request, DispatchError::Backend("empty reply".into()))
                    .await;
            }
            Err(e) => return self.fail(&request, e).await,
        };
        self.deliver(&request, content).await
    }

    async fn fail(&self, request: &DispatchRequest, error: DispatchError) -> ExchangeOutcome {
        warn!(
            session_id = %request.session_id,
            model = %request.model_id,
            error = %error,
            "Dispatcher failed"
        );
        if self.surface_dispatch_errors {
            let content = format!("No reply from {}: {error}", request.model_name);
            return self.deliver(request, content).await;
        }
        self.drop_reply(
            request,
            DropReason::DispatchFailed {
                error: error.to_string(),
            },
        )
    }

    async fn deliver(&self, request: &DispatchRequest, content: String) -> ExchangeOutcome {
        let message = ChatMessage::bot(content, request.model_id.clone());

        let mut state = self.state.lock().await;
        if state
            .sessions
            .append_message(request.session_id, message.clone())
            .is_err()
        {
            debug!(session_id = %request.session_id, "Session gone before reply arrived");
            return self.drop_reply(request, DropReason::SessionDeleted);
        }
        info!(
            session_id = %request.session_id,
            model = %request.model_id,
            state = ?ExchangeState::Delivered,
            "Reply delivered"
        );
        self.commit(
            &state,
            ChatEvent::MessageAppended {
                session_id: request.session_id,
                message: message.clone(),
            },
        );
        ExchangeOutcome::Delivered { message }
    }

    fn drop_reply(&self, request: &DispatchRequest, reason: DropReason) -> ExchangeOutcome {
        self.publish(ChatEvent::ReplyDropped {
            session_id: request.session_id,
            model_id: request.model_id.clone(),
            drop: reason.clone(),
        });
        ExchangeOutcome::Dropped { drop: reason }
    }
}

impl std::fmt::Debug for ChatService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatService")
            .field("dispatcher", &self.dispatcher.name())
            .field("surface_dispatch_errors", &self.surface_dispatch_errors)
            .finish()
    }
}
