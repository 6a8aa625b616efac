use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Everything that can go wrong talking to the provider.
///
/// Callers above this layer treat every variant the same way; the detail is
/// only kept for logs.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("parse error: {0}")]
    Malformed(String),
}

/// A single text completion against the external model.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError>;
}

// Talks to any OpenAI-compatible chat completions endpoint (Groq by default)
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
}

impl HttpGateway {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Self {
        // add http:// if not present
        let base_url = if base_url.starts_with("http") {
            base_url.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", base_url.trim_end_matches('/'))
        };

        Self {
            client,
            base_url,
            api_key,
            model,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionGateway for HttpGateway {
    async fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens,
            temperature,
        };

        // single attempt, a timeout surfaces as a transport error
        let res = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ProviderError::Status { status, body });
        }

        let body = res
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Malformed("no message content in choices".to_string()))
    }
}
