// ABOUTME: LLM module - provider abstraction for language model backends.
// ABOUTME: Defines types, the provider trait, vendor implementations, and the facade.

mod anthropic;
mod openai;
mod provider;
mod types;
mod wrapper;

pub use anthropic::*;
pub use openai::*;
pub use provider::*;
pub use types::*;
pub use wrapper::*;


#[cfg(test)]
mod anthropic_test;
