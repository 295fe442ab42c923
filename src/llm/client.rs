//! OpenAI-compatible chat completion client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{LlmOptions, Provider};
use crate::error::LlmError;

use super::prompt::{PromptContext, build_user_prompt, clean_message, default_system_prompt};
use super::retry::retry_with_backoff;

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENROUTER_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

const REQUEST_TIMEOUT_SECS: u64 = 60;
/// Error bodies are cut to this many bytes.
const MAX_ERROR_BODY: usize = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for `/chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(rename = "max_completion_tokens", skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Where and how to send a request.
#[derive(Debug, Clone, PartialEq)]
pub struct Destination {
    pub provider: Provider,
    pub endpoint: String,
    pub api_key: String,
    pub referer: Option<String>,
    pub title: Option<String>,
}

/// Sends one chat request and returns the raw reply content.
///
/// This abstraction allows mocking the HTTP layer in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, destination: &Destination, request: &ChatRequest)
    -> Result<String, LlmError>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(LlmError::Transport)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(
        &self,
        destination: &Destination,
        request: &ChatRequest,
    ) -> Result<String, LlmError> {
        let mut builder = self
            .client
            .post(&destination.endpoint)
            .bearer_auth(&destination.api_key)
            .json(request);

        if destination.provider == Provider::OpenRouter {
            if let Some(referer) = &destination.referer {
                builder = builder.header("HTTP-Referer", referer);
            }
            if let Some(title) = &destination.title {
                builder = builder.header("X-Title", title);
            }
        }

        let response = builder.send().await.map_err(LlmError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(LlmError::Transport)?;

        if status.as_u16() >= 300 {
            return Err(LlmError::Http {
                status: status.as_u16(),
                body: truncate_bytes(&body, MAX_ERROR_BODY).trim().to_string(),
            });
        }

        extract_content(&body)
    }
}

/// Pull the first choice's text out of a response body.
pub fn extract_content(body: &str) -> Result<String, LlmError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

    let choice = response.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
    let content = choice
        .message
        .and_then(|m| m.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .or_else(|| choice.text.map(|t| t.trim().to_string()))
        .unwrap_or_default();

    Ok(content)
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Explicit endpoint, else the provider default.
pub fn resolve_endpoint(provider: Provider, endpoint: Option<&str>) -> String {
    match endpoint.map(str::trim).filter(|e| !e.is_empty()) {
        Some(endpoint) => endpoint.to_string(),
        None => match provider {
            Provider::OpenAi => OPENAI_ENDPOINT.to_string(),
            Provider::OpenRouter => OPENROUTER_ENDPOINT.to_string(),
        },
    }
}

/// Explicit key, else `COMMITGEN_LLM_KEY`, else the provider's own variable.
pub fn resolve_api_key(provider: Provider, api_key: Option<&str>) -> Option<String> {
    let from_env = |name: &str| {
        std::env::var(name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    api_key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| from_env("COMMITGEN_LLM_KEY"))
        .or_else(|| {
            from_env(match provider {
                Provider::OpenAi => "OPENAI_API_KEY",
                Provider::OpenRouter => "OPENROUTER_API_KEY",
            })
        })
}

/// Resolve the destination and request for a prompt context.
pub fn prepare(
    llm: &LlmOptions,
    ctx: &PromptContext<'_>,
) -> Result<(Destination, ChatRequest), LlmError> {
    if llm.model.is_empty() {
        return Err(LlmError::MissingModel);
    }
    let api_key =
        resolve_api_key(llm.provider, llm.api_key.as_deref()).ok_or(LlmError::MissingApiKey)?;

    let destination = Destination {
        provider: llm.provider,
        endpoint: resolve_endpoint(llm.provider, llm.endpoint.as_deref()),
        api_key,
        referer: llm.referer.clone(),
        title: llm.title.clone(),
    };

    let system = llm.system.clone().unwrap_or_else(default_system_prompt);
    let request = ChatRequest {
        model: llm.model.clone(),
        messages: vec![
            ChatMessage::system(system),
            ChatMessage::user(build_user_prompt(ctx, llm.max_diff)),
        ],
        temperature: llm.temperature,
        max_tokens: llm.max_tokens,
    };

    Ok((destination, request))
}

/// Ask the model for a commit message, retrying transient failures.
pub async fn generate_message<T: ChatTransport + ?Sized>(
    llm: &LlmOptions,
    ctx: &PromptContext<'_>,
    transport: &T,
) -> Result<String, LlmError> {
    let (destination, request) = prepare(llm, ctx)?;
    debug!(
        "Requesting commit message from {} ({})",
        destination.provider, request.model
    );

    let raw = retry_with_backoff(
        || async { transport.send(&destination, &request).await },
        LlmError::is_transient,
        |e| {
            warn!("llm request failed after retries: {}", e);
            LlmError::RetriesExhausted(Box::new(e))
        },
    )
    .await?;

    let message = clean_message(&raw);
    if message.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(message)
}
