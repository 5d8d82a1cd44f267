// ABOUTME: Configuration management for API credentials.
// ABOUTME: Loads the Anthropic API key from the environment or a .env file.

use crate::error::LlmError;

/// Environment variable holding the default provider's API key.
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Credential configuration for the wrapper's default provider.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
}

impl Config {
    /// Create a config from an explicit key, falling back to the environment.
    ///
    /// A `.env` file in the working directory is loaded first, matching the
    /// behavior of the deployment scripts. Fails fast when no key is found.
    pub fn new(anthropic_api_key: Option<String>) -> Result<Self, LlmError> {
        dotenvy::dotenv().ok();

        let anthropic_api_key = match anthropic_api_key {
            Some(key) => key,
            None => std::env::var(ANTHROPIC_API_KEY_VAR).map_err(|_| {
                LlmError::Configuration(format!(
                    "Anthropic API key is required. Set {ANTHROPIC_API_KEY_VAR} or pass it directly."
                ))
            })?,
        };

        Ok(Self { anthropic_api_key })
    }

    /// Create a config from environment variables only.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(None)
    }
}
