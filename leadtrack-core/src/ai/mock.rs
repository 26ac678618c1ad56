use std::sync::{Arc, Mutex};

use crate::ai::{error::GenerationError, provider::GenerationProvider, types::GenerationRequest};

/// Mock behavior for the mock provider
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MockBehavior {
    /// Return the same canned reply on every call
    Reply { text: String },
    /// Pop replies off a queue, one per call; fall back to a stock reply
    /// when the queue runs dry
    ReplyQueue { replies: Vec<String> },
    /// Always fail with a transport error
    #[default]
    AlwaysUnavailable,
    /// Always fail with a backend error body
    AlwaysBackendError,
    /// Always return a response with no usable text
    AlwaysEmpty,
}

/// Mock generation provider for testing
#[derive(Clone)]
pub struct MockProvider {
    behavior: Arc<Mutex<MockBehavior>>,
    call_count: Arc<Mutex<usize>>,
    captured_requests: Arc<Mutex<Vec<GenerationRequest>>>,
}

impl MockProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior: Arc::new(Mutex::new(behavior)),
            call_count: Arc::new(Mutex::new(0)),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(MockBehavior::Reply { text: text.into() })
    }

    pub fn set_behavior(&self, behavior: MockBehavior) {
        *self.behavior.lock().unwrap() = behavior;
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn get_captured_requests(&self) -> Vec<GenerationRequest> {
        self.captured_requests.lock().unwrap().clone()
    }

    pub fn get_last_captured_request(&self) -> Option<GenerationRequest> {
        self.captured_requests.lock().unwrap().last().cloned()
    }

    fn next_reply_from_queue(behavior: &mut MockBehavior) -> Option<String> {
        if let MockBehavior::ReplyQueue { replies } = behavior {
            if replies.is_empty() {
                return Some("Mock response".to_string());
            }
            return Some(replies.remove(0));
        }
        None
    }
}

#[async_trait::async_trait]
impl GenerationProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        {
            let mut requests = self.captured_requests.lock().unwrap();
            requests.push(request);
        }
        {
            let mut count = self.call_count.lock().unwrap();
            *count += 1;
        }

        let mut behavior = self.behavior.lock().unwrap();
        if let Some(reply) = Self::next_reply_from_queue(&mut behavior) {
            return Ok(reply);
        }

        match &*behavior {
            MockBehavior::Reply { text } => Ok(text.clone()),
            MockBehavior::ReplyQueue { .. } => unreachable!("queue handled above"),
            MockBehavior::AlwaysUnavailable => Err(GenerationError::Unavailable(anyhow::anyhow!(
                "Mock transport failure"
            ))),
            MockBehavior::AlwaysBackendError => {
                Err(GenerationError::Backend("Mock backend error".to_string()))
            }
            MockBehavior::AlwaysEmpty => Err(GenerationError::EmptyResponse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::types::HistoryMessage;

    fn request(content: &str) -> GenerationRequest {
        GenerationRequest {
            standing_instructions: String::new(),
            history: vec![HistoryMessage::user("earlier")],
            trailing_user_content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_mock_provider_reply() {
        let provider = MockProvider::replying("On it.");

        let response = provider.generate(request("Test")).await.unwrap();
        assert_eq!(response, "On it.");
        assert_eq!(provider.get_call_count(), 1);
        assert_eq!(
            provider.get_last_captured_request().unwrap().trailing_user_content,
            "Test"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_reply_queue() {
        let provider = MockProvider::new(MockBehavior::ReplyQueue {
            replies: vec!["first".to_string(), "second".to_string()],
        });

        assert_eq!(provider.generate(request("a")).await.unwrap(), "first");
        assert_eq!(provider.generate(request("b")).await.unwrap(), "second");
        assert_eq!(
            provider.generate(request("c")).await.unwrap(),
            "Mock response"
        );
    }

    #[tokio::test]
    async fn test_mock_provider_unavailable() {
        let provider = MockProvider::new(MockBehavior::AlwaysUnavailable);

        let result = provider.generate(request("Test")).await;
        assert!(matches!(result, Err(GenerationError::Unavailable(_))));
    }
}
