//! AssistantEngine - The read-only collaborators every conversation shares.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{
    AssistantConfig, ConfigError, ConversationConfig, ValidationError, MAX_REPLY_DELAY_MS,
};
use crate::domain::conversation::ReplyPolicy;
use crate::domain::escalation::EscalationController;
use crate::domain::foundation::{DomainError, ValidationError as FieldError};
use crate::domain::intent::{IntentClassifier, ResponseGenerator, RuleBasedIntentClassifier};
use crate::domain::knowledge::KnowledgeBase;

/// Catalog, classifier, templates and escalation wording.
///
/// Immutable once built. One engine is shared by any number of
/// conversations through an `Arc`.
#[derive(Clone)]
pub struct AssistantEngine {
    knowledge: KnowledgeBase,
    classifier: Arc<dyn IntentClassifier>,
    responses: ResponseGenerator,
    escalation: EscalationController,
}

impl AssistantEngine {
    pub fn new(
        knowledge: KnowledgeBase,
        classifier: Arc<dyn IntentClassifier>,
        responses: ResponseGenerator,
        escalation: EscalationController,
    ) -> Self {
        Self {
            knowledge,
            classifier,
            responses,
            escalation,
        }
    }

    /// Builds the engine from configuration, reading any data files it names.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a configuration value is invalid
    /// - `Io` / `Data` if a data file cannot be read or holds invalid data
    pub fn from_config(config: &AssistantConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let knowledge = config
            .knowledge
            .load_catalog()?
            .with_suggestion_limit(config.conversation.faq_suggestion_limit);
        let classifier = config.knowledge.load_classifier()?;
        let responses = config.knowledge.load_responses()?;
        let escalation = EscalationController::new(config.escalation.wait_estimate.clone())
            .map_err(|_| ValidationError::MissingRequired("WAIT_ESTIMATE"))?;

        tracing::info!(
            faq_entries = knowledge.len(),
            intent_rules = classifier.rules().len(),
            "assistant engine ready"
        );

        Ok(Self::new(knowledge, Arc::new(classifier), responses, escalation))
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn classifier(&self) -> &dyn IntentClassifier {
        self.classifier.as_ref()
    }

    pub fn responses(&self) -> &ResponseGenerator {
        &self.responses
    }

    pub fn escalation(&self) -> &EscalationController {
        &self.escalation
    }
}

impl Default for AssistantEngine {
    fn default() -> Self {
        Self::new(
            KnowledgeBase::default(),
            Arc::new(RuleBasedIntentClassifier::default()),
            ResponseGenerator::default(),
            EscalationController::default(),
        )
    }
}

impl std::fmt::Debug for AssistantEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantEngine")
            .field("knowledge", &self.knowledge)
            .field("responses", &self.responses)
            .field("escalation", &self.escalation)
            .finish_non_exhaustive()
    }
}

/// Per-conversation behaviour: typing delay, overlap policy, welcome text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSettings {
    pub reply_delay: Duration,
    pub reply_policy: ReplyPolicy,
    pub welcome_message: String,
}

impl ConversationSettings {
    /// Reply delay in whole milliseconds, saturating at `u64::MAX`.
    pub fn reply_delay_ms(&self) -> u64 {
        u64::try_from(self.reply_delay.as_millis()).unwrap_or(u64::MAX)
    }

    /// Checks the reply delay is non-zero and within the configured ceiling.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the delay is zero or above the ceiling
    pub fn validate(&self) -> Result<(), DomainError> {
        let delay_ms = self.reply_delay_ms();
        if self.reply_delay.is_zero() || delay_ms > MAX_REPLY_DELAY_MS {
            return Err(FieldError::out_of_range(
                "reply_delay_ms",
                1,
                MAX_REPLY_DELAY_MS as i64,
                i64::try_from(delay_ms).unwrap_or(i64::MAX),
            )
            .into());
        }
        Ok(())
    }
}

impl From<&ConversationConfig> for ConversationSettings {
    fn from(config: &ConversationConfig) -> Self {
        Self {
            reply_delay: config.reply_delay(),
            reply_policy: config.reply_policy,
            welcome_message: config.welcome_message.clone(),
        }
    }
}

impl Default for ConversationSettings {
    fn default() -> Self {
        Self::from(&ConversationConfig::default())
    }
}
