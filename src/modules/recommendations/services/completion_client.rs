use std::time::Duration;

use async_trait::async_trait;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{Deserialize, Serialize};

use crate::config::CompletionConfig;
use crate::core::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_RETRIES: u32 = 2;

/// A chat-completion provider that answers a single prompt
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Raw text of the first choice
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// OpenAI-compatible `/chat/completions` client
pub struct OpenAiCompletionClient {
    client: ClientWithMiddleware,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiCompletionClient {
    pub fn new(api_key: String, base_url: String, model: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(MAX_RETRIES);
        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    /// None when no API key is configured
    pub fn from_config(config: &CompletionConfig) -> Result<Option<Self>> {
        match &config.api_key {
            Some(api_key) => Self::new(
                api_key.clone(),
                config.base_url.clone(),
                config.model.clone(),
            )
            .map(Some),
            None => Ok(None),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenAiCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: 0.0,
            max_tokens: 20,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Completion API error {}: {}",
                status, body
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Failed to parse completion response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AppError::upstream("Completion response had no content"))
    }
}
