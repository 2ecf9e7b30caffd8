//! State machine trait for status enums.
//!
//! Gives the lifecycle enums of a conversation (surface open/closed, reply
//! idle/scheduled) one way to validate and perform transitions.

use super::{DomainError, ErrorCode};

/// Trait for status enums that represent state machines.
///
/// Implementors list their valid transitions; validated transitions come for
/// free.
///
/// ```ignore
/// let next = ReplyStatus::Idle.transition_to(ReplyStatus::Scheduled)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the target is not reachable from self
    fn transition_to(&self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
