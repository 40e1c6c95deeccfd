//! OpenAI chat completions client.

use std::time::Duration;

use feedflamer_core::{retry_with_backoff, SYSTEM_INSTRUCTION};
use reqwest::Client;

use crate::error::NarrativeError;
use crate::retry::is_retriable;
use crate::types::{ChatMessage, ChatRequest, ChatResponse, ErrorEnvelope};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Client that turns a composed prompt into a podcast script.
pub struct NarrativeClient {
    client: Client,
    api_key: String,
    model: String,
    url: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl NarrativeClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, NarrativeError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (wiremock in tests, or a
    /// compatible proxy).
    ///
    /// # Errors
    ///
    /// Returns [`NarrativeError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, NarrativeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            model: model.to_owned(),
            url: format!("{}/v1/chat/completions", base_url.trim_end_matches('/')),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Requests a script for `prompt` under the fixed system instruction.
    ///
    /// Returns the first choice's content exactly as generated.
    ///
    /// # Errors
    ///
    /// - [`NarrativeError::EmptyResponse`] when there is no choice or its content is blank.
    /// - [`NarrativeError::Api`] on a non-2xx status (after retries for 429/5xx).
    /// - [`NarrativeError::Http`] on network failure or timeout.
    /// - [`NarrativeError::Deserialize`] when the body is not a chat completion.
    pub async fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, NarrativeError> {
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens,
            temperature,
        };

        tracing::debug!(
            model = %self.model,
            max_tokens,
            temperature,
            prompt_chars = prompt.chars().count(),
            "requesting script"
        );

        let response = retry_with_backoff(
            self.max_retries,
            self.backoff_base_ms,
            is_retriable,
            || self.send(&request),
        )
        .await?;

        let script = response.into_script().ok_or(NarrativeError::EmptyResponse)?;
        tracing::debug!(script_chars = script.chars().count(), "script received");
        Ok(script)
    }

    async fn send(&self, request: &ChatRequest<'_>) -> Result<ChatResponse, NarrativeError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .map(|e| e.error.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown").to_owned());
            return Err(NarrativeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| NarrativeError::Deserialize {
            context: "chat completion".to_owned(),
            source: e,
        })
    }
}
