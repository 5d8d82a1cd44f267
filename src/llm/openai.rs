// ABOUTME: OpenAI Chat Completions API provider implementation.
// ABOUTME: Implements the Provider trait for GPT models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::provider::{Provider, TextStream};
use super::types::GenerationParams;
use crate::error::LlmError;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model when none is specified.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default token ceiling when none is specified.
pub const OPENAI_DEFAULT_MAX_TOKENS: u32 = 1000;

/// Models supported by this provider.
pub const OPENAI_MODELS: &[&str] = &[
    "gpt-4",
    "gpt-4-turbo-preview",
    "gpt-3.5-turbo",
    "gpt-3.5-turbo-16k",
];

/// OpenAI API request format.
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// OpenAI message format.
#[derive(Debug, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    pub content: Option<String>,
}

impl OpenAIRequest {
    pub(crate) fn new(prompt: &str, params: &GenerationParams, default_model: &str) -> Self {
        OpenAIRequest {
            model: params
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: Some(prompt.to_string()),
            }],
            max_tokens: Some(params.max_tokens.unwrap_or(OPENAI_DEFAULT_MAX_TOKENS)),
            temperature: params.temperature,
            stream: None,
            extra: params.extra.clone(),
        }
    }
}

/// OpenAI API response format.
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    pub id: String,
    pub model: String,
    pub choices: Vec<OpenAIChoice>,
}

/// OpenAI response choice.
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    pub message: OpenAIMessage,
    pub finish_reason: Option<String>,
}

/// OpenAI API error response.
#[derive(Debug, Deserialize)]
pub struct OpenAIError {
    pub error: OpenAIErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct OpenAIErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

/// OpenAI streaming chunk.
#[derive(Debug, Deserialize)]
pub struct OpenAIStreamChunk {
    pub choices: Vec<OpenAIStreamChoice>,
}

/// OpenAI streaming choice.
#[derive(Debug, Deserialize)]
pub struct OpenAIStreamChoice {
    pub delta: OpenAIDelta,
    pub finish_reason: Option<String>,
}

/// OpenAI streaming delta.
#[derive(Debug, Deserialize)]
pub struct OpenAIDelta {
    pub content: Option<String>,
}

fn parse_sse_line(line: &str) -> Option<OpenAIStreamChunk> {
    let data = line.strip_prefix("data: ")?;
    if data == "[DONE]" {
        return None;
    }
    serde_json::from_str(data).ok()
}

/// Provider for the OpenAI Chat Completions API.
#[derive(Debug, Clone)]
pub struct OpenAIProvider {
    api_key: String,
    http: reqwest::Client,
    default_model: String,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: reqwest::Client::new(),
            default_model: OPENAI_DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a new OpenAI provider from the OPENAI_API_KEY environment variable.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            LlmError::Configuration("OPENAI_API_KEY environment variable not set".to_string())
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
impl Provider for OpenAIProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        let request = OpenAIRequest::new(prompt, params, &self.default_model);
        debug!(model = %request.model, "sending OpenAI generate request");

        let response = self
            .http
            .post(OPENAI_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error: OpenAIError = response.json().await?;
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: error.error.message,
            });
        }

        let body: OpenAIResponse = response.json().await?;
        debug!(id = %body.id, model = %body.model, "OpenAI response received");

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyResponse)
    }

    fn generate_stream(&self, prompt: &str, params: &GenerationParams) -> TextStream {
        let mut request = OpenAIRequest::new(prompt, params, &self.default_model);
        request.stream = Some(true);

        let api_key = self.api_key.clone();
        let http = self.http.clone();

        Box::pin(async_stream::try_stream! {
            let response = http
                .post(OPENAI_API_URL)
                .header("Authorization", format!("Bearer {}", api_key))
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let error_text = response.text().await?;
                let error: OpenAIError = serde_json::from_str(&error_text)?;
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

                    if line.is_empty() || line == "data: [DONE]" {
                        continue;
                    }

                    if let Some(chunk) = parse_sse_line(&line) {
                        for choice in chunk.choices {
                            if let Some(text) = choice.delta.content {
                                yield text;
                            }
                        }
                    }
                }
            }
        })
    }

    fn available_models(&self) -> &[&str] {
        OPENAI_MODELS
    }
}

#[cfg(test)]
mod openai_test {
    use super::*;

    #[test]
    fn test_client_from_env_missing() {
        // SAFETY: This test runs in isolation and only affects this process
        unsafe {
            std::env::remove_var("OPENAI_API_KEY");
        }
        let result = OpenAIProvider::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_request_defaults() {
        let params = GenerationParams::new();
        let request = OpenAIRequest::new("Hello", &params, OPENAI_DEFAULT_MODEL);

        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.max_tokens, Some(OPENAI_DEFAULT_MAX_TOKENS));
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.messages[0].content.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_request_explicit_params() {
        let params = GenerationParams::new()
            .model("gpt-4")
            .max_tokens(256)
            .temperature(0.2)
            .extra("top_p", serde_json::json!(0.9));
        let request = OpenAIRequest::new("Hi", &params, OPENAI_DEFAULT_MODEL);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4");
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["temperature"], 0.2);
        assert_eq!(json["top_p"], 0.9);
        assert!(json.get("stream").is_none());
    }

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "id": "chatcmpl-123",
            "model": "gpt-3.5-turbo",
            "choices": [{
                "message": {"role": "assistant", "content": "Hello!"},
                "finish_reason": "stop"
            }]
        }"#;

        let response: OpenAIResponse = serde_json::from_str(json).unwrap();
        let text = response.choices.into_iter().next().unwrap().message.content;
        assert_eq!(text.as_deref(), Some("Hello!"));
    }

    #[test]
    fn test_parse_sse_line() {
        let chunk =
            parse_sse_line(r#"data: {"choices":[{"delta":{"content":"Hi"},"finish_reason":null}]}"#)
                .unwrap();
        assert_eq!(chunk.choices[0].delta.content.as_deref(), Some("Hi"));

        assert!(parse_sse_line("data: [DONE]").is_none());
        assert!(parse_sse_line("event: ping").is_none());
    }
}
