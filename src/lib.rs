// ABOUTME: Root module for mealwise - LLM provider wrapper for meal planning.
// ABOUTME: Re-exports all public types from submodules.

pub mod config;
pub mod error;
pub mod llm;
pub mod nutrition;
pub mod prelude;

pub use error::MealwiseError;
