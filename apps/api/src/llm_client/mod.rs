/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may talk to the completion endpoint directly.
/// The pipeline only sees the `ChatCompletionApi` trait; `LlmClient` is the HTTP
/// implementation of it against an OpenAI-compatible `/chat/completions` route.
///
/// Model: deepseek-chat (hardcoded — it is also written into every envelope)
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::credential::ApiKey;
use crate::models::generation::GenerationConfig;

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
/// The model used for the processing call and named in the envelope.
pub const MODEL: &str = "deepseek-chat";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response shape: {0}")]
    Protocol(String),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A `{"role", "content"}` pair, shared by the outbound request and the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl ChatRequest {
    /// Sampling parameters are copied verbatim, no clamping.
    pub fn new(messages: Vec<ChatMessage>, config: &GenerationConfig) -> Self {
        Self {
            model: MODEL.to_string(),
            messages,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            top_p: config.top_p,
            frequency_penalty: config.frequency_penalty,
            presence_penalty: config.presence_penalty,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ApiChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The text of `choices[0].message.content`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: Option<Usage>,
}

impl ApiResponse {
    fn into_completion(self) -> Result<ChatCompletion, LlmError> {
        let usage = self.usage;
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Protocol("no choices in response".to_string()))?;
        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(ChatCompletion { content, usage }),
            _ => Err(LlmError::EmptyContent),
        }
    }
}

/// One chat-completion round trip.
#[async_trait]
pub trait ChatCompletionApi: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError>;
}

/// Builds a completion client once a credential has been resolved.
///
/// Carried in `AppState` as `Arc<dyn CompletionConnector>`.
pub trait CompletionConnector: Send + Sync {
    fn connect(&self, api_key: ApiKey) -> Result<Arc<dyn ChatCompletionApi>, LlmError>;
}

/// Connects `LlmClient`s to a fixed OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct DeepSeekConnector {
    base_url: String,
    timeout: Duration,
}

impl DeepSeekConnector {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl CompletionConnector for DeepSeekConnector {
    fn connect(&self, api_key: ApiKey) -> Result<Arc<dyn ChatCompletionApi>, LlmError> {
        let client = LlmClient::new(api_key, &self.base_url, self.timeout)?;
        Ok(Arc::new(client))
    }
}

/// HTTP client for an OpenAI-compatible chat-completions endpoint.
/// No retries: a failed call fails the request.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: ApiKey,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: ApiKey, base_url: &str, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatCompletionApi for LlmClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        debug!(model = %request.model, endpoint = %self.endpoint(), "Sending completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(self.api_key.expose())
            .json(request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let api_response: ApiResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::Protocol(e.to_string()))?;
        let completion = api_response.into_completion()?;

        if let Some(usage) = completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(completion)
    }
}
