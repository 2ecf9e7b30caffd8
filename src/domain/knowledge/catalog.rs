//! The FAQ catalog.

use serde::Deserialize;

use super::faq::FaqEntry;
use crate::domain::foundation::ValidationError;

/// Number of entries the FAQ panel suggests when nothing else is configured.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;

const DEFAULT_CATALOG: &[(&str, &str)] = &[
    (
        "How do I change my password?",
        "You can change your password in the Profile Management section. Enter your current password and set a new one with at least 8 characters including uppercase, lowercase, number, and special character.",
    ),
    (
        "How do I view my purchased products?",
        "Your purchased products are displayed in the main dashboard. You can see their status (Active, Pending, or Expired) and take appropriate actions.",
    ),
    (
        "What should I do if my product status is 'Pending'?",
        "If your product status shows as 'Pending', it means the activation is in progress. This usually takes 24-48 hours. You can click 'Check Status' for updates.",
    ),
    (
        "How can I contact support?",
        "You can use this chatbot for immediate help, or click 'Request Support' on any expired product. For complex issues, I can escalate you to a human agent.",
    ),
    (
        "Can I get a refund for my purchase?",
        "Refund policies vary by product. Please provide your product details and I'll help you understand the refund options available.",
    ),
    ("hi", "hello how can I help you?"),
];

/// Static, ordered catalog of FAQ entries.
///
/// Lookups are pure: they never fail and never mutate the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    entries: Vec<FaqEntry>,
    suggestion_limit: usize,
}

#[derive(Deserialize)]
struct CatalogFile {
    entries: Vec<FaqEntry>,
}

impl KnowledgeBase {
    /// Builds a catalog from an ordered list of entries.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if any entry has a blank question or answer
    /// - `EmptyField` if the list is empty
    pub fn new(entries: Vec<FaqEntry>) -> Result<Self, ValidationError> {
        if entries.is_empty() {
            return Err(ValidationError::empty_field("entries"));
        }
        for entry in &entries {
            entry.validate()?;
        }
        Ok(Self {
            entries,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        })
    }

    /// Parses a catalog from YAML of the form `entries: [{question, answer}]`.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the document does not parse
    /// - any error from [`KnowledgeBase::new`]
    pub fn from_yaml(yaml: &str) -> Result<Self, ValidationError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)
            .map_err(|e| ValidationError::invalid_format("faq_catalog", e.to_string()))?;
        Self::new(file.entries)
    }

    /// Sets how many entries [`KnowledgeBase::suggestions`] returns.
    pub fn with_suggestion_limit(mut self, limit: usize) -> Self {
        self.suggestion_limit = limit;
        self
    }

    /// Returns entries in catalog order, at most `limit` of them.
    pub fn entries(&self, limit: Option<usize>) -> &[FaqEntry] {
        match limit {
            Some(limit) => &self.entries[..limit.min(self.entries.len())],
            None => &self.entries,
        }
    }

    /// Returns the entries shown in the FAQ panel.
    pub fn suggestions(&self) -> &[FaqEntry] {
        self.entries(Some(self.suggestion_limit))
    }

    /// Returns the answer of an entry.
    pub fn answer_for<'a>(&self, entry: &'a FaqEntry) -> &'a str {
        entry.answer()
    }

    /// Finds an entry by its question, ignoring case and surrounding whitespace.
    pub fn find_by_question(&self, question: &str) -> Option<&FaqEntry> {
        let wanted = question.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.question().to_lowercase() == wanted)
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self {
            entries: DEFAULT_CATALOG
                .iter()
                .map(|(question, answer)| FaqEntry {
                    question: (*question).to_string(),
                    answer: (*answer).to_string(),
                })
                .collect(),
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
        }
    }
}
