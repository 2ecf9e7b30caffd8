//! FAQ entry value object.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// A pre-authored question/answer pair.
///
/// # Invariants
///
/// - `question` and `answer` are non-blank (validated at construction)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaqEntry {
    pub(super) question: String,
    pub(super) answer: String,
}

impl FaqEntry {
    /// Creates an entry.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if question or answer is blank
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let entry = Self {
            question: question.into(),
            answer: answer.into(),
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Returns the question shown on the FAQ shortcut.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the canned answer.
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Re-checks invariants; entries deserialized from data files skip `new`.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if self.question.trim().is_empty() {
            return Err(ValidationError::empty_field("question"));
        }
        if self.answer.trim().is_empty() {
            return Err(ValidationError::empty_field("answer"));
        }
        Ok(())
    }
}
