use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::{error::GenerationError, provider::GenerationProvider, types::*};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 2048;

#[derive(Clone)]
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the provider at a different endpoint. Used by tests against a
    /// local stub server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn build_messages(request: &GenerationRequest) -> Vec<WireMessage> {
        let mut messages: Vec<WireMessage> = request
            .history
            .iter()
            .map(|m| WireMessage {
                role: match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                }
                .to_string(),
                content: m.content.clone(),
            })
            .collect();

        messages.push(WireMessage {
            role: "user".to_string(),
            content: request.trailing_user_content.clone(),
        });

        messages
    }
}

#[async_trait::async_trait]
impl GenerationProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String, GenerationError> {
        let wire_request = WireRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            system: request.standing_instructions.clone(),
            messages: Self::build_messages(&request),
        };

        debug!(model = %self.model, messages = wire_request.messages.len(), "Calling Anthropic API");

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                debug!(?e, "Anthropic API call failed");
                GenerationError::Unavailable(anyhow::anyhow!("Network error: {}", e))
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            GenerationError::Unavailable(anyhow::anyhow!("Failed to read response: {}", e))
        })?;

        if !status.is_success() {
            debug!(?status, ?response_text, "Anthropic API returned error");

            // Carry only the short message field; the caller renders it to
            // the user verbatim.
            let message = serde_json::from_str::<WireErrorResponse>(&response_text)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status}"));

            return Err(GenerationError::Backend(message));
        }

        let wire_response: WireResponse = serde_json::from_str(&response_text).map_err(|e| {
            debug!(error = %e, ?response_text, "Failed to parse Anthropic response");
            GenerationError::Backend("Unexpected response format".to_string())
        })?;

        let text: String = wire_response
            .content
            .iter()
            .filter(|block| block.r#type == "text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(text)
    }
}

// Anthropic messages API types

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    content: Vec<WireContentBlock>,
}

#[derive(Debug, Deserialize)]
struct WireContentBlock {
    r#type: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct WireErrorResponse {
    error: WireErrorBody,
}

#[derive(Debug, Deserialize)]
struct WireErrorBody {
    message: String,
}
