//! Chat-completion client for the remote model backend.
//!
//! Speaks the Ollama `/api/chat` contract: one user message in, the full
//! reply text out (`message.content`), streaming disabled.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AiError;

/// Default per-call timeout; generation latency varies widely between models.
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(120);

/// Anything that can answer a single-turn prompt with a given model.
///
/// Implementations must allow concurrent calls from many requests.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send `prompt` to `model` and return the reply text unmodified.
    async fn chat(&self, prompt: &str, model: &str) -> Result<String, AiError>;
}

/// Connection settings for [`OllamaClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://ollama.com`; `/api/chat` is appended.
    pub base_url: String,
    /// Bearer credential. `None` means the header is not sent at all.
    pub api_key: Option<String>,
    /// Sampling temperature shared by every task.
    pub temperature: f64,
    /// Whole-call timeout, connect through last body byte.
    pub timeout: Duration,
}

impl BackendConfig {
    /// Settings for `base_url` with no credential, temperature 0.7 and
    /// [`CHAT_TIMEOUT`].
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            temperature: 0.7,
            timeout: CHAT_TIMEOUT,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

/// reqwest-backed [`ChatBackend`]. Cheap to share behind an `Arc`; the inner
/// connection pool serves concurrent requests.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    temperature: f64,
}

impl OllamaClient {
    pub fn new(config: BackendConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiError::Client)?;

        Ok(Self {
            client,
            endpoint: format!("{}/api/chat", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.filter(|key| !key.is_empty()),
            temperature: config.temperature,
        })
    }

    /// Full URL of the chat endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn transport_error(model: &str, source: reqwest::Error) -> AiError {
        if source.is_timeout() {
            AiError::Timeout {
                model: model.to_owned(),
            }
        } else {
            AiError::Transport {
                model: model.to_owned(),
                source,
            }
        }
    }
}

#[async_trait]
impl ChatBackend for OllamaClient {
    async fn chat(&self, prompt: &str, model: &str) -> Result<String, AiError> {
        let body = ChatRequest {
            model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            temperature: self.temperature,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(model, prompt_len = prompt.len(), "sending chat request");
        let response = request
            .send()
            .await
            .map_err(|e| Self::transport_error(model, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(if status == StatusCode::NOT_FOUND {
                AiError::ModelNotFound {
                    model: model.to_owned(),
                }
            } else {
                AiError::Status {
                    model: model.to_owned(),
                    status: status.as_u16(),
                    body,
                }
            });
        }

        let reply: ChatResponse = response.json().await.map_err(|source| {
            if source.is_timeout() {
                Self::transport_error(model, source)
            } else {
                AiError::Envelope {
                    model: model.to_owned(),
                    source,
                }
            }
        })?;

        debug!(model, reply_len = reply.message.content.len(), "chat reply received");
        Ok(reply.message.content)
    }
}
