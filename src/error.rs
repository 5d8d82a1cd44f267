// ABOUTME: Defines all error types for the mealwise library using thiserror.
// ABOUTME: LLM and prompt errors have their own enums, unified under MealwiseError.

/// Top-level error type for the mealwise library.
#[derive(Debug, thiserror::Error)]
pub enum MealwiseError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

/// Errors from LLM provider operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Response contained no text content")]
    EmptyResponse,

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors from prompt assembly.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("System prompt file not found: {path}")]
    NotFound {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
