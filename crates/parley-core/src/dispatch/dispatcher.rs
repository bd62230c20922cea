//! ResponseDispatcher trait definition.
//!
//! This is the boundary between the chat pipeline and whatever actually
//! generates replies. Uses RPITIT for `invoke`; see `BoxDispatcher` for the
//! object-safe wrapper used at runtime.

use parley_types::dispatch::{DispatchError, DispatchRequest};

/// Trait for reply backends (simulated, or a real inference client).
///
/// Implementations must resolve exactly once per call. There is no ordering
/// guarantee between calls and no cancellation: once invoked, a call runs to
/// completion.
pub trait ResponseDispatcher: Send + Sync {
    /// Human-readable backend name (e.g., "simulated").
    fn name(&self) -> &str;

    /// Produce the reply text for one user message.
    fn invoke(
        &self,
        request: &DispatchRequest,
    ) -> impl std::future::Future<Output = Result<String, DispatchError>> + Send;
}
