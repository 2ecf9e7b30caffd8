//! Escalation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::escalation::DEFAULT_WAIT_ESTIMATE;

/// Escalation configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EscalationConfig {
    /// Wait time announced when handing off to a human
    #[serde(default = "default_wait_estimate")]
    pub wait_estimate: String,
}

impl EscalationConfig {
    /// Validate escalation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.wait_estimate.trim().is_empty() {
            return Err(ValidationError::MissingRequired("WAIT_ESTIMATE"));
        }
        Ok(())
    }
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            wait_estimate: default_wait_estimate(),
        }
    }
}

fn default_wait_estimate() -> String {
    DEFAULT_WAIT_ESTIMATE.to_string()
}
