// ABOUTME: Core types for LLM communication - roles, messages, and
// ABOUTME: generation parameters shared by every provider.

use serde::{Deserialize, Serialize};

/// Role of a message sender.
///
/// Boundary input may carry role strings outside the known set; those
/// deserialize to `Unknown` and are dropped during prompt flattening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Label used when rendering a message into a flat prompt.
    /// `None` means the message is excluded from the prompt entirely.
    pub fn prompt_label(&self) -> Option<&'static str> {
        match self {
            Role::System => Some("System"),
            Role::User => Some("User"),
            Role::Assistant => Some("Assistant"),
            Role::Unknown => None,
        }
    }
}

/// A conversation message. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Tunable parameters for a generation request.
///
/// The facade enforces no defaults; each provider applies its own default
/// model and token ceiling when a field is absent. `extra` carries
/// provider-specific key/value pairs forwarded verbatim into the request body.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl GenerationParams {
    /// Create empty parameters (provider defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set temperature.
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Add a provider-specific parameter.
    pub fn extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}
