//! Groq chat-completion client.

use std::time::Duration;

use skycast_core::{ChatConfig, ReqwestErrorExt};
use skycast_models::ForecastSequence;
use tracing::instrument;

use crate::error::ChatError;
use crate::prompt::{system_prompt, user_prompt};
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Reply returned instead of calling the provider when no key is configured
pub const MISSING_KEY_REPLY: &str = "⚠️ GROQ_API_KEY not set in .env file.";

#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    temperature: f64,
    city: String,
}

impl ChatClient {
    pub fn new(config: &ChatConfig, city: &str) -> Result<Self, ChatError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ChatError::Network(e.into_network_error()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            city: city.to_string(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the assistant about `forecast`.
    ///
    /// Never fails on provider trouble: a missing key yields
    /// [`MISSING_KEY_REPLY`] and a non-success status yields the raw error
    /// body. Only transport failures and unreadable success bodies are errors.
    #[instrument(skip(self, forecast), level = "info")]
    pub async fn summarize(
        &self,
        forecast: &ForecastSequence,
        user_message: &str,
    ) -> Result<String, ChatError> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!("Chat requested without a configured API key");
            return Ok(MISSING_KEY_REPLY.to_string());
        };

        let url = format!("{}{}", self.base_url, COMPLETIONS_PATH);
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt(&self.city)),
                ChatMessage::user(user_prompt(&self.city, forecast, user_message)),
            ],
            temperature: self.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.into_network_error()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.into_network_error()))?;

        if !status.is_success() {
            tracing::warn!("Chat provider returned {}: {}", status, text);
            return Ok(format!("AI Error: {}", text));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;

        parsed
            .into_content()
            .ok_or_else(|| ChatError::MalformedResponse("response has no choices".to_string()))
    }
}
