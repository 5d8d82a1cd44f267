// ABOUTME: Nutrition module - prompt assembly and response parsing for the
// ABOUTME: nutritionist assistant that sits on top of the LLM wrapper.

mod parser;
mod prompt;

pub use parser::*;
pub use prompt::*;
