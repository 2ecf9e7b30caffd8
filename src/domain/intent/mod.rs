//! Intent module.
//!
//! Turns free text into an [`Intent`] with ordered keyword rules and maps
//! each intent to exactly one response template.

mod classifier;
mod intent;
mod response;

pub use classifier::{IntentClassifier, IntentRule, RuleBasedIntentClassifier};
pub use intent::Intent;
pub use response::{ResponseGenerator, ResponseTemplates};
