//! The closed set of intents a user turn can be classified into.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The classified purpose of a user turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Wants to change their password.
    PasswordChange,
    /// Asks about a purchased product.
    ProductInquiry,
    /// Wants a refund or to return something.
    RefundRequest,
    /// Asks for a human.
    HumanEscalation,
    /// Nothing matched. A valid result, answered with the fallback template.
    Unknown,
}

impl Intent {
    /// Every intent, in classification priority order, `Unknown` last.
    pub const ALL: [Intent; 5] = [
        Intent::PasswordChange,
        Intent::ProductInquiry,
        Intent::RefundRequest,
        Intent::HumanEscalation,
        Intent::Unknown,
    ];

    /// Returns true for the fallback intent.
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Intent::PasswordChange => "password_change",
            Intent::ProductInquiry => "product_inquiry",
            Intent::RefundRequest => "refund_request",
            Intent::HumanEscalation => "human_escalation",
            Intent::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
