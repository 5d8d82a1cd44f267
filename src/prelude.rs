// ABOUTME: Prelude module - convenient imports for common use cases.
// ABOUTME: Use `use mealwise::prelude::*;` to get started quickly.

pub use crate::config::Config;
pub use crate::error::{LlmError, MealwiseError, PromptError};
pub use crate::llm::{
    AnthropicProvider, GenerationParams, LlmWrapper, Message, OpenAIProvider, Provider, Role,
    TextStream,
};
pub use crate::nutrition::{
    ParsedResponse, build_prompt, load_system_prompt, parse_nutritionist_response,
};
