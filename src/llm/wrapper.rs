// ABOUTME: LlmWrapper facade - a single entry point over one held provider.
// ABOUTME: Adds conversation flattening for providers that only accept flat prompts.

use super::anthropic::AnthropicProvider;
use super::provider::{Provider, TextStream};
use super::types::{GenerationParams, Message};
use crate::config::Config;
use crate::error::LlmError;

/// Unified interface over a single LLM provider.
///
/// Holds exactly one provider, injected at construction. Build one instance
/// at process start and pass it by reference into request-handling code.
pub struct LlmWrapper {
    provider: Box<dyn Provider>,
}

impl LlmWrapper {
    /// Create a wrapper around an explicit provider.
    pub fn new(provider: Box<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Create a wrapper with the default Anthropic provider.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Box::new(AnthropicProvider::new(
            config.anthropic_api_key.clone(),
        )))
    }

    /// Create a wrapper with the default provider, configured from the environment.
    pub fn from_env() -> Result<Self, LlmError> {
        Ok(Self::from_config(&Config::from_env()?))
    }

    /// Generate text from a prompt. Pure pass-through to the held provider.
    pub async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        self.provider.generate(prompt, params).await
    }

    /// Generate a stream of text fragments. Pure pass-through.
    pub fn generate_stream(&self, prompt: &str, params: &GenerationParams) -> TextStream {
        self.provider.generate_stream(prompt, params)
    }

    /// Chat with the model using a conversation format.
    ///
    /// Providers accept only a flat prompt, so the conversation is flattened
    /// to text first. Multi-turn structure is not preserved beyond the
    /// rendered transcript.
    pub async fn chat(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, LlmError> {
        let prompt = flatten_messages(messages);
        self.generate(&prompt, params).await
    }

    /// Models supported by the held provider.
    pub fn available_models(&self) -> &[&str] {
        self.provider.available_models()
    }
}

/// Convert an ordered list of messages into a single prompt string.
///
/// Each message renders as "{Role}: {content}", joined by blank lines, with a
/// trailing "Assistant:" cue so the model continues the conversation.
/// Messages with an unrecognized role are silently dropped.
pub(crate) fn flatten_messages(messages: &[Message]) -> String {
    let parts: Vec<String> = messages
        .iter()
        .filter_map(|message| {
            message
                .role
                .prompt_label()
                .map(|label| format!("{}: {}", label, message.content))
        })
        .collect();

    parts.join("\n\n") + "\n\nAssistant:"
}
