//! BoxDispatcher -- object-safe dynamic dispatch wrapper for ResponseDispatcher.
//!
//! 1. Define an object-safe `ResponseDispatcherDyn` trait with boxed futures
//! 2. Blanket-impl `ResponseDispatcherDyn` for all `T: ResponseDispatcher`
//! 3. `BoxDispatcher` wraps `Box<dyn ResponseDispatcherDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use parley_types::dispatch::{DispatchError, DispatchRequest};

use super::dispatcher::ResponseDispatcher;

/// Object-safe version of [`ResponseDispatcher`] with boxed futures.
pub trait ResponseDispatcherDyn: Send + Sync {
    fn name(&self) -> &str;

    fn invoke_boxed<'a>(
        &'a self,
        request: &'a DispatchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, DispatchError>> + Send + 'a>>;
}

impl<T: ResponseDispatcher> ResponseDispatcherDyn for T {
    fn name(&self) -> &str {
        ResponseDispatcher::name(self)
    }

    fn invoke_boxed<'a>(
        &'a self,
        request: &'a DispatchRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, DispatchError>> + Send + 'a>> {
        Box::pin(self.invoke(request))
    }
}

/// Type-erased dispatcher for runtime backend selection.
///
/// `ResponseDispatcher` uses RPITIT and cannot be a trait object directly;
/// `BoxDispatcher` offers the same methods over a `ResponseDispatcherDyn`.
pub struct BoxDispatcher {
    inner: Box<dyn ResponseDispatcherDyn + Send + Sync>,
}

impl BoxDispatcher {
    /// Wrap a concrete dispatcher in a type-erased box.
    pub fn new<T: ResponseDispatcher + 'static>(dispatcher: T) -> Self {
        Self {
            inner: Box::new(dispatcher),
        }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Produce the reply text for one user message.
    pub async fn invoke(&self, request: &DispatchRequest) -> Result<String, DispatchError> {
        self.inner.invoke_boxed(request).await
    }
}

impl std::fmt::Debug for BoxDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxDispatcher")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::SessionId;

    struct EchoDispatcher;

    impl ResponseDispatcher for EchoDispatcher {
        fn name(&self) -> &str {
            "echo"
        }

        async fn invoke(&self, request: &DispatchRequest) -> Result<String, DispatchError> {
            Ok(format!("{}: {}", request.model_id, request.text))
        }
    }

    #[tokio::test]
    async fn test_box_dispatcher_delegates() {
        let dispatcher = BoxDispatcher::new(EchoDispatcher);
        assert_eq!(dispatcher.name(), "echo");

        let request = DispatchRequest {
            session_id: SessionId::new(),
            model_id: "groq".to_string(),
            model_name: "Groq".to_string(),
            text: "ping".to_string(),
        };
        assert_eq!(dispatcher.invoke(&request).await.unwrap(), "groq: ping");
    }

    #[test]
    fn test_debug_impl() {
        let dispatcher = BoxDispatcher::new(EchoDispatcher);
        assert!(format!("{dispatcher:?}").contains("echo"));
    }
}
