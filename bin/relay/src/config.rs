//! Relay configuration.
//!
//! Strongly-typed configuration loaded via the `config` crate from
//! environment variables with a `__` separator, e.g.
//! `SYSTEM_MESSAGE`, `MAX_TURNS`, `OPENAI__API_KEY`, `OPENAI__MODEL`.

use serde::Deserialize;

/// Top-level relay configuration.
#[derive(Debug, Deserialize)]
pub struct RelayConfig {
    /// The system message seeding every new conversation.
    pub system_message: String,

    /// Maximum messages kept per user beyond the seed.
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,

    /// Completion service configuration.
    pub openai: OpenAiConfig,
}

/// Completion service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    /// API key for the completion service.
    pub api_key: String,

    /// Model identifier.
    pub model: String,

    /// Base URL of the service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Cap on generated tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature in [0, 1].
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_max_turns() -> usize {
    10
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_max_tokens() -> u32 {
    256
}

fn default_temperature() -> f32 {
    0.5
}

fn default_timeout_secs() -> u64 {
    30
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_optional_fields() {
        let config: RelayConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                system_message = "You are a helpful assistant."
                [openai]
                api_key = "sk-test"
                model = "gpt-4o-mini"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .expect("build")
            .try_deserialize()
            .expect("deserialize");

        assert_eq!(config.max_turns, 10);
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai.max_tokens, 256);
        assert_eq!(config.openai.temperature, 0.5);
        assert_eq!(config.openai.timeout_secs, 30);
    }

    #[test]
    fn missing_required_fields_fail() {
        let result: Result<RelayConfig, _> = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [openai]
                model = "gpt-4o-mini"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .expect("build")
            .try_deserialize();

        assert!(result.is_err());
    }
}
