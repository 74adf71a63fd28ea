use std::time::Duration;

use backlink_logging::{backlink_debug, backlink_error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("LLM API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("could not read LLM response: {0}")]
    Parse(String),
    #[error("LLM response contained no message")]
    EmptyReply,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

/// A single-turn chat completion: one system and one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    /// Returns the assistant message text.
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Clone)]
pub struct ChatSettings {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    /// Generation of a full batch can take a while; keep this generous.
    pub request_timeout: Duration,
}

impl ChatSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            request_timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReply,
}

#[derive(Debug, Deserialize)]
struct WireReply {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions client, pointed at DeepSeek by default.
#[derive(Debug, Clone)]
pub struct DeepSeekClient {
    settings: ChatSettings,
    http: reqwest::Client,
}

impl DeepSeekClient {
    pub fn new(settings: ChatSettings) -> Result<Self, LlmError> {
        if settings.api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { settings, http })
    }

    fn headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.settings.api_key))
            .map_err(|err| LlmError::Config(err.to_string()))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl ChatClient for DeepSeekClient {
    async fn complete(&self, request: ChatRequest) -> Result<String, LlmError> {
        let body = WireRequest {
            model: &self.settings.model,
            messages: [
                WireMessage {
                    role: "system",
                    content: &request.system,
                },
                WireMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        backlink_debug!(
            "chat request model={} prompt_len={}",
            self.settings.model,
            request.user.len()
        );
        let response = self
            .http
            .post(&self.settings.api_url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            backlink_error!("LLM API error status={} body={}", status, body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: WireResponse =
            serde_json::from_str(&text).map_err(|err| LlmError::Parse(err.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyReply)
    }
}
