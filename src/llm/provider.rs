// ABOUTME: Defines the Provider trait - the abstraction layer that allows
// ABOUTME: the wrapper to work with any LLM backend (Anthropic, OpenAI, etc.)

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use super::GenerationParams;
use crate::error::LlmError;

/// Lazy pull-based sequence of text fragments from a streaming generation.
///
/// The consumer drives the stream; dropping it early abandons the underlying
/// transport connection. A mid-stream failure surfaces as an `Err` item at
/// the point of failure - fragments already yielded remain valid.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, LlmError>> + Send + 'static>>;

/// Trait for LLM provider implementations.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Generate a completion for a prompt (non-streaming, single round trip).
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, LlmError>;

    /// Generate a completion as a stream of text fragments, in transport order.
    fn generate_stream(&self, prompt: &str, params: &GenerationParams) -> TextStream;

    /// Models this provider supports. Static list, no network call.
    fn available_models(&self) -> &[&str];
}
