//! Placeholder backend that answers after a fixed delay with a templated
//! reply naming the model.

use std::time::Duration;

use parley_types::dispatch::{DispatchError, DispatchRequest};

use super::dispatcher::ResponseDispatcher;

/// Latency used when none is configured.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1_000);

/// Stand-in dispatcher used until a real inference backend is wired up.
#[derive(Debug, Clone)]
pub struct SimulatedDispatcher {
    delay: Duration,
}

impl SimulatedDispatcher {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The reply text produced for a model display name.
    pub fn reply_for(model_name: &str) -> String {
        format!(
            "This is a simulated response from {model_name}. In a real implementation, this would be connected to the actual API."
        )
    }
}

impl Default for SimulatedDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY)
    }
}

impl ResponseDispatcher for SimulatedDispatcher {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn invoke(&self, request: &DispatchRequest) -> Result<String, DispatchError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::reply_for(&request.model_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_types::chat::SessionId;

    #[tokio::test]
    async fn test_reply_mentions_model_name() {
        let dispatcher = SimulatedDispatcher::new(Duration::ZERO);
        let request = DispatchRequest {
            session_id: SessionId::new(),
            model_id: "gemini".to_string(),
            model_name: "Gemini".to_string(),
            text: "hello".to_string(),
        };
        let reply = dispatcher.invoke(&request).await.unwrap();
        assert!(reply.starts_with("This is a simulated response from Gemini."));
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(SimulatedDispatcher::default().delay, DEFAULT_REPLY_DELAY);
    }
}
