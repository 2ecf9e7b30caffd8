//! Assistant configuration module
//!
//! Type-safe configuration loaded with the `config` and `dotenvy` crates.
//! Environment variables use the `SUPPORT_ASSISTANT` prefix and nested values
//! are separated by double underscores. An optional YAML/TOML file can sit
//! underneath the environment.
//!
//! # Example
//!
//! ```no_run
//! use support_assistant::config::{init_tracing, AssistantConfig};
//!
//! let config = AssistantConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! init_tracing(&config.logging).expect("Invalid log filter");
//!
//! println!("Replies arrive after {:?}", config.conversation.reply_delay());
//! ```

mod conversation;
mod error;
mod escalation;
mod knowledge;
mod logging;

pub use conversation::{ConversationConfig, MAX_REPLY_DELAY_MS};
pub use error::{ConfigError, ValidationError};
pub use escalation::EscalationConfig;
pub use knowledge::KnowledgeConfig;
pub use logging::{init_tracing, LoggingConfig};

use serde::Deserialize;
use std::path::Path;

/// Root assistant configuration
///
/// Every section has defaults that reproduce the stock assistant, so an
/// empty environment is a valid configuration.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AssistantConfig {
    /// Typing delay, FAQ panel, welcome text, reply overlap policy
    #[serde(default)]
    pub conversation: ConversationConfig,

    /// Human handoff announcement
    #[serde(default)]
    pub escalation: EscalationConfig,

    /// Optional data files replacing the built-in catalog, rules, templates
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Tracing output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AssistantConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SUPPORT_ASSISTANT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SUPPORT_ASSISTANT__CONVERSATION__REPLY_DELAY_MS=500`
    /// - `SUPPORT_ASSISTANT__KNOWLEDGE__FAQ_CATALOG_PATH=/etc/assistant/faq.yaml`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Load configuration from a file, with environment variables on top
    ///
    /// The format follows the file extension (`.yaml`, `.toml`, `.json`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed, or values
    /// cannot be parsed into expected types.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()))
    }

    fn build(file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::default()
                    .prefix("SUPPORT_ASSISTANT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.conversation.validate()?;
        self.escalation.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
