//! Conversation behaviour configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::conversation::ReplyPolicy;
use crate::domain::knowledge::DEFAULT_SUGGESTION_LIMIT;

/// Upper bound on the typing delay, in milliseconds.
pub const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// Conversation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationConfig {
    /// Typing delay before a bot reply, in milliseconds
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// How many FAQ entries the panel suggests
    #[serde(default = "default_faq_suggestion_limit")]
    pub faq_suggestion_limit: usize,

    /// What a new submission does to replies still pending
    #[serde(default)]
    pub reply_policy: ReplyPolicy,

    /// First bot turn of every conversation
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
}

impl ConversationConfig {
    /// Get reply delay as Duration
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Validate conversation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reply_delay_ms == 0 || self.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ValidationError::InvalidReplyDelay);
        }
        if self.faq_suggestion_limit == 0 {
            return Err(ValidationError::InvalidSuggestionLimit);
        }
        if self.welcome_message.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WELCOME_MESSAGE"));
        }
        Ok(())
    }
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            faq_suggestion_limit: default_faq_suggestion_limit(),
            reply_policy: ReplyPolicy::default(),
            welcome_message: default_welcome_message(),
        }
    }
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_faq_suggestion_limit() -> usize {
    DEFAULT_SUGGESTION_LIMIT
}

fn default_welcome_message() -> String {
    "Hello! I'm your support assistant. How can I help you today? You can ask questions or browse our FAQs below.".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_config_defaults() {
        let config = ConversationConfig::default();
        assert_eq!(config.reply_delay_ms, 1000);
        assert_eq!(config.faq_suggestion_limit, 3);
        assert_eq!(config.reply_policy, ReplyPolicy::Concurrent);
        assert!(config.welcome_message.starts_with("Hello! I'm your support assistant."));
    }

    #[test]
    fn test_reply_delay_duration() {
        let config = ConversationConfig {
            reply_delay_ms: 250,
            ..Default::default()
        };
        assert_eq!(config.reply_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_validation_zero_delay() {
        let config = ConversationConfig {
            reply_delay_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidReplyDelay));
    }

    #[test]
    fn test_validation_delay_too_long() {
        let config = ConversationConfig {
            reply_delay_ms: MAX_REPLY_DELAY_MS + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_suggestions() {
        let config = ConversationConfig {
            faq_suggestion_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidSuggestionLimit));
    }

    #[test]
    fn test_validation_blank_welcome() {
        let config = ConversationConfig {
            welcome_message: "   ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialization() {
        let json = r#"{
            "reply_delay_ms": 400,
            "reply_policy": "replace"
        }"#;
        let config: ConversationConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.reply_delay_ms, 400);
        assert_eq!(config.reply_policy, ReplyPolicy::Replace);
        assert_eq!(config.faq_suggestion_limit, 3);
    }
}
