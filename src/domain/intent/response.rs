//! Response templates keyed by intent.

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use crate::domain::foundation::ValidationError;
use crate::domain::knowledge::FaqEntry;

/// One literal response per intent, plus the fallback for `Unknown`.
///
/// Every field has the stock wording as its serde default, so a YAML override
/// only needs the templates it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseTemplates {
    pub password_change: String,
    pub product_inquiry: String,
    pub refund_request: String,
    pub human_escalation: String,
    pub fallback: String,
}

impl Default for ResponseTemplates {
    fn default() -> Self {
        Self {
            password_change: "To change your password, go to the Profile Management section. Enter your current password and create a new one with at least 8 characters including uppercase, lowercase, number, and special character. Need more help with this?".to_string(),
            product_inquiry: "Your purchased products are shown in the dashboard with their current status. Active products are ready to use, Pending products are being activated, and Expired products may need renewal. Which product do you need help with?".to_string(),
            refund_request: "I can help you with refund inquiries. Could you please tell me which product you'd like to return and the reason? I'll check the refund policy for that specific item.".to_string(),
            human_escalation: "I'll connect you with a human support agent. Please hold on while I transfer your chat. In the meantime, could you briefly describe your issue so I can provide context to the agent?".to_string(),
            fallback: "I understand your question. Let me help you with that. Could you provide a bit more detail so I can give you the most accurate assistance? You can also check our FAQs for common questions.".to_string(),
        }
    }
}

impl ResponseTemplates {
    fn for_intent(&self, intent: Intent) -> &str {
        match intent {
            Intent::PasswordChange => &self.password_change,
            Intent::ProductInquiry => &self.product_inquiry,
            Intent::RefundRequest => &self.refund_request,
            Intent::HumanEscalation => &self.human_escalation,
            Intent::Unknown => &self.fallback,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        for intent in Intent::ALL {
            if self.for_intent(intent).trim().is_empty() {
                return Err(ValidationError::empty_field(format!("responses.{}", intent)));
            }
        }
        Ok(())
    }
}

/// Maps intents and FAQ entries to bot text. Pure and total.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseGenerator {
    templates: ResponseTemplates,
}

impl ResponseGenerator {
    /// Creates a generator over custom templates.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if any template is blank
    pub fn new(templates: ResponseTemplates) -> Result<Self, ValidationError> {
        templates.validate()?;
        Ok(Self { templates })
    }

    /// Parses templates from YAML; omitted fields keep the stock wording.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the document does not parse
    /// - `EmptyField` if any template is blank
    pub fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        let templates: ResponseTemplates = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("responses", e.to_string()))?;
        Self::new(templates)
    }

    /// Response text for a classified intent.
    pub fn respond(&self, intent: Intent) -> &str {
        self.templates.for_intent(intent)
    }

    /// Response text for a selected FAQ entry: its answer, verbatim.
    pub fn respond_from_faq<'a>(&self, entry: &'a FaqEntry) -> &'a str {
        entry.answer()
    }

    /// The templates in use.
    pub fn templates(&self) -> &ResponseTemplates {
        &self.templates
    }
}
