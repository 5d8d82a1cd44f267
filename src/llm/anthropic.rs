// ABOUTME: Anthropic Messages API provider implementation.
// ABOUTME: Implements the Provider trait for Claude models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{Provider, TextStream};
use super::types::GenerationParams;
use crate::error::LlmError;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Default model when none is specified.
pub const ANTHROPIC_DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

/// Default token ceiling when none is specified. The Messages API requires
/// max_tokens on every request.
pub const ANTHROPIC_DEFAULT_MAX_TOKENS: u32 = 1000;

/// Models supported by this provider.
pub const ANTHROPIC_MODELS: &[&str] = &["claude-3-5-haiku-20241022", "claude-3-haiku-20240307"];

/// Anthropic API request format.
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Anthropic message format. The wrapper sends the flat prompt as a single
/// user message with plain string content.
#[derive(Debug, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

impl AnthropicRequest {
    pub(crate) fn new(prompt: &str, params: &GenerationParams, default_model: &str) -> Self {
        AnthropicRequest {
            model: params
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            max_tokens: params.max_tokens.unwrap_or(ANTHROPIC_DEFAULT_MAX_TOKENS),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: params.temperature,
            stream: None,
            extra: params.extra.clone(),
        }
    }
}

/// Anthropic API response format.
#[derive(Debug, Deserialize)]
pub struct AnthropicResponse {
    pub id: String,
    pub model: String,
    pub content: Vec<AnthropicContent>,
}

/// Anthropic response content block.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicContent {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

/// Anthropic API error response.
#[derive(Debug, Deserialize)]
pub struct AnthropicError {
    pub error: AnthropicErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct AnthropicErrorDetail {
    #[serde(rename = "type")]
    pub error_type: String,
    pub message: String,
}

/// Anthropic streaming event. Only text deltas and errors are acted on;
/// every other event type (message_start, ping, block boundaries, usage
/// deltas) is skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamEvent {
    ContentBlockDelta {
        index: usize,
        delta: AnthropicStreamDelta,
    },
    Error {
        error: AnthropicErrorDetail,
    },
    #[serde(other)]
    Other,
}

/// Delta payload within a content_block_delta event.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamDelta {
    TextDelta {
        text: String,
    },
    #[serde(other)]
    Other,
}

fn parse_sse_line(line: &str) -> Option<AnthropicStreamEvent> {
    let data = line.strip_prefix("data: ")?;
    serde_json::from_str(data).ok()
}

/// Provider for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    api_key: String,
    http: reqwest::Client,
    default_model: String,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::Client::new(),
            default_model: ANTHROPIC_DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a new Anthropic provider from the ANTHROPIC_API_KEY environment variable.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
            LlmError::Configuration("ANTHROPIC_API_KEY environment variable not set".to_string())
        })?;
        Ok(Self::new(api_key))
    }

    /// Set the default model to use when none is specified in the parameters.
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        let request = AnthropicRequest::new(prompt, params, &self.default_model);
        debug!(model = %request.model, "sending Anthropic generate request");

        let response = self
            .http
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error: AnthropicError = response.json().await?;
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error.error.message,
            });
        }

        let body: AnthropicResponse = response.json().await?;
        debug!(id = %body.id, model = %body.model, "Anthropic response received");

        body.content
            .into_iter()
            .find_map(|block| match block {
                AnthropicContent::Text { text } => Some(text),
                AnthropicContent::Other => None,
            })
            .ok_or(LlmError::EmptyResponse)
    }

    fn generate_stream(&self, prompt: &str, params: &GenerationParams) -> TextStream {
        let mut request = AnthropicRequest::new(prompt, params, &self.default_model);
        request.stream = Some(true);

        let api_key = self.api_key.clone();
        let http = self.http.clone();

        Box::pin(async_stream::try_stream! {
            let response = http
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await?;
                let error: AnthropicError = serde_json::from_str(&error_text)?;
                Err(LlmError::Api {
                    status: status.as_u16(),
                    message: error.error.message,
                })?;
                return;
            }

            let mut stream = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = futures::StreamExt::next(&mut stream).await {
                let chunk = chunk?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // Process complete lines
                while let Some(pos) = buffer.find('\n') {
                    let line = buffer[..pos].trim().to_string();
                    buffer = buffer[pos + 1..].to_string();

                    if line.is_empty() {
                        continue;
                    }

                    match parse_sse_line(&line) {
                        Some(AnthropicStreamEvent::ContentBlockDelta { delta, .. }) => {
                            if let AnthropicStreamDelta::TextDelta { text } = delta {
                                yield text;
                            }
                        }
                        Some(AnthropicStreamEvent::Error { error }) => {
                            Err(LlmError::Stream(error.message))?;
                        }
                        _ => {}
                    }
                }
            }
        })
    }

    fn available_models(&self) -> &[&str] {
        ANTHROPIC_MODELS
    }
}
