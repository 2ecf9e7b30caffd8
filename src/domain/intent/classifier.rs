//! Keyword-based intent classification.

use serde::{Deserialize, Serialize};

use super::intent::Intent;
use crate::domain::foundation::ValidationError;

/// Classifies user intent from message content.
pub trait IntentClassifier: Send + Sync {
    /// Classify the intent of a user's message.
    ///
    /// Callers reject blank input before classifying.
    fn classify(&self, text: &str) -> Intent;
}

/// One classification rule: any trigger present in the text selects `intent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRule {
    pub intent: Intent,
    pub triggers: Vec<String>,
}

impl IntentRule {
    /// Creates a rule from an intent and its trigger substrings.
    pub fn new<I, S>(intent: Intent, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            intent,
            triggers: triggers.into_iter().map(Into::into).collect(),
        }
    }

    fn matching_trigger(&self, lowercase: &str) -> Option<&str> {
        self.triggers
            .iter()
            .map(String::as_str)
            .find(|trigger| lowercase.contains(trigger))
    }
}

#[derive(Deserialize)]
struct RuleFile {
    rules: Vec<IntentRule>,
}

/// Ordered-rule classifier: the first rule with a matching trigger wins.
///
/// Matching is case-insensitive substring search. Rule order is priority
/// order, so "my product needs a refund" is a product inquiry, not a refund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBasedIntentClassifier {
    rules: Vec<IntentRule>,
}

impl RuleBasedIntentClassifier {
    /// Builds a classifier from rules in priority order.
    ///
    /// Triggers are lowercased here so classification only lowercases input.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if a rule targets `Unknown`
    /// - `EmptyField` if a rule has no triggers or a blank trigger
    pub fn new(rules: Vec<IntentRule>) -> Result<Self, ValidationError> {
        let mut normalized = Vec::with_capacity(rules.len());
        for rule in rules {
            if rule.intent.is_unknown() {
                return Err(ValidationError::invalid_format(
                    "intent",
                    "the unknown intent is the fallback and cannot have triggers",
                ));
            }
            if rule.triggers.is_empty() {
                return Err(ValidationError::empty_field("triggers"));
            }
            let mut triggers = Vec::with_capacity(rule.triggers.len());
            for trigger in rule.triggers {
                let trigger = trigger.trim().to_lowercase();
                if trigger.is_empty() {
                    return Err(ValidationError::empty_field("trigger"));
                }
                triggers.push(trigger);
            }
            normalized.push(IntentRule {
                intent: rule.intent,
                triggers,
            });
        }
        Ok(Self { rules: normalized })
    }

    /// Parses rules from YAML of the form `rules: [{intent, triggers}]`.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the document does not parse
    /// - any error from [`RuleBasedIntentClassifier::new`]
    pub fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        let file: RuleFile = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("intent_rules", e.to_string()))?;
        Self::new(file.rules)
    }

    /// The rules in priority order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// Classifies and also reports which trigger decided it.
    pub fn classify_with_trigger(&self, text: &str) -> (Intent, Option<&str>) {
        let lowercase = text.to_lowercase();
        self.rules
            .iter()
            .find_map(|rule| {
                rule.matching_trigger(&lowercase)
                    .map(|trigger| (rule.intent, Some(trigger)))
            })
            .unwrap_or((Intent::Unknown, None))
    }
}

impl Default for RuleBasedIntentClassifier {
    fn default() -> Self {
        Self {
            rules: vec![
                IntentRule::new(Intent::PasswordChange, ["password", "change"]),
                IntentRule::new(Intent::ProductInquiry, ["product", "purchase"]),
                IntentRule::new(Intent::RefundRequest, ["refund", "return"]),
                IntentRule::new(Intent::HumanEscalation, ["human", "agent", "support"]),
            ],
        }
    }
}

impl IntentClassifier for RuleBasedIntentClassifier {
    fn classify(&self, text: &str) -> Intent {
        let (intent, trigger) = self.classify_with_trigger(text);
        tracing::debug!(%intent, trigger = trigger.unwrap_or("-"), "classified user text");
        intent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classifier() -> RuleBasedIntentClassifier {
        RuleBasedIntentClassifier::default()
    }

    mod default_rules {
        use super::*;

        #[test]
        fn password_change_is_case_insensitive() {
            let c = classifier();
            assert_eq!(c.classify("CHANGE password"), Intent::PasswordChange);
            assert_eq!(c.classify("change password"), Intent::PasswordChange);
            assert_eq!(
                c.classify("I want to change my password please"),
                Intent::PasswordChange
            );
        }

        #[test]
        fn product_inquiry() {
            assert_eq!(
                classifier().classify("Where are my purchases?"),
                Intent::ProductInquiry
            );
        }

        #[test]
        fn refund_request() {
            assert_eq!(
                classifier().classify("I'd like to RETURN this"),
                Intent::RefundRequest
            );
        }

        #[test]
        fn human_escalation() {
            let c = classifier();
            assert_eq!(c.classify("let me talk to a human"), Intent::HumanEscalation);
            assert_eq!(c.classify("Agent please"), Intent::HumanEscalation);
            assert_eq!(c.classify("support?"), Intent::HumanEscalation);
        }

        #[test]
        fn unmatched_text_is_unknown() {
            assert_eq!(classifier().classify("xyz"), Intent::Unknown);
        }

        #[test]
        fn product_outranks_refund() {
            assert_eq!(
                classifier().classify("my product needs a refund"),
                Intent::ProductInquiry
            );
        }

        #[test]
        fn password_outranks_everything() {
            assert_eq!(
                classifier().classify("support agent: refund my product password"),
                Intent::PasswordChange
            );
        }

        #[test]
        fn substring_matches_inside_words() {
            // "exchange" contains "change"
            assert_eq!(classifier().classify("exchange rates"), Intent::PasswordChange);
        }

        #[test]
        fn reports_deciding_trigger() {
            let c = classifier();
            assert_eq!(
                c.classify_with_trigger("Can I get a refund?"),
                (Intent::RefundRequest, Some("refund"))
            );
            assert_eq!(c.classify_with_trigger("hello"), (Intent::Unknown, None));
        }
    }

    mod construction {
        use super::*;

        #[test]
        fn lowercases_triggers() {
            let c = RuleBasedIntentClassifier::new(vec![IntentRule::new(
                Intent::RefundRequest,
                ["  Money Back "],
            )])
            .unwrap();
            assert_eq!(c.rules()[0].triggers, vec!["money back".to_string()]);
            assert_eq!(c.classify("I want my MONEY BACK"), Intent::RefundRequest);
        }

        #[test]
        fn custom_order_changes_priority() {
            let c = RuleBasedIntentClassifier::new(vec![
                IntentRule::new(Intent::RefundRequest, ["refund"]),
                IntentRule::new(Intent::ProductInquiry, ["product"]),
            ])
            .unwrap();
            assert_eq!(c.classify("my product needs a refund"), Intent::RefundRequest);
        }

        #[test]
        fn rejects_rule_for_unknown() {
            let err = RuleBasedIntentClassifier::new(vec![IntentRule::new(Intent::Unknown, ["x"])])
                .unwrap_err();
            assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        }

        #[test]
        fn rejects_rule_without_triggers() {
            let err = RuleBasedIntentClassifier::new(vec![IntentRule::new(
                Intent::PasswordChange,
                Vec::<String>::new(),
            )])
            .unwrap_err();
            assert_eq!(err, ValidationError::empty_field("triggers"));
        }

        #[test]
        fn rejects_blank_trigger() {
            let err = RuleBasedIntentClassifier::new(vec![IntentRule::new(
                Intent::PasswordChange,
                ["password", "   "],
            )])
            .unwrap_err();
            assert_eq!(err, ValidationError::empty_field("trigger"));
        }

        #[test]
        fn empty_rule_list_classifies_everything_as_unknown() {
            let c = RuleBasedIntentClassifier::new(Vec::new()).unwrap();
            assert_eq!(c.classify("password"), Intent::Unknown);
        }

        #[test]
        fn parses_yaml_rules() {
            let yaml = r#"
rules:
  - intent: human_escalation
    triggers: ["operator"]
  - intent: password_change
    triggers: ["login", "Password"]
"#;
            let c = RuleBasedIntentClassifier::from_yaml(yaml).unwrap();
            assert_eq!(c.rules().len(), 2);
            assert_eq!(c.classify("operator, my password!"), Intent::HumanEscalation);
            assert_eq!(c.classify("cannot LOGIN"), Intent::PasswordChange);
        }

        #[test]
        fn yaml_with_unknown_intent_name_fails() {
            let yaml = "rules:\n  - intent: shipping\n    triggers: [\"ship\"]\n";
            let err = RuleBasedIntentClassifier::from_yaml(yaml).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        }
    }

    proptest! {
        #[test]
        fn classification_is_deterministic(text in ".{1,64}") {
            let c = classifier();
            prop_assert_eq!(c.classify(&text), c.classify(&text));
        }

        #[test]
        fn classification_ignores_ascii_case(text in "[a-zA-Z ]{1,64}") {
            let c = classifier();
            prop_assert_eq!(c.classify(&text.to_uppercase()), c.classify(&text.to_lowercase()));
        }

        #[test]
        fn any_text_containing_password_is_password_change(
            prefix in "[a-z ]{0,20}",
            suffix in "[a-z ]{0,20}",
        ) {
            let text = format!("{}password{}", prefix, suffix);
            prop_assert_eq!(classifier().classify(&text), Intent::PasswordChange);
        }
    }
}
