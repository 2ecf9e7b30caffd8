//! ConversationObserver port - Interface for watching a conversation.
//!
//! A presentation layer subscribes an observer to re-render whenever the
//! timeline, the FAQ panel, or the typing indicator changes.

use crate::domain::conversation::ConversationEvent;

/// Receives conversation events in the order they happened.
///
/// Implementations should be:
/// - **Quick** - called synchronously after each mutation
/// - **Non-reentrant** - may read the controller, but should not mutate it
///   from inside `on_event`
///
/// # Example
///
/// ```ignore
/// struct Repaint;
///
/// impl ConversationObserver for Repaint {
///     fn on_event(&self, event: &ConversationEvent) {
///         if let ConversationEvent::TurnsAppended { turns } = event {
///             // draw turns...
///         }
///     }
///
///     fn name(&self) -> &'static str {
///         "Repaint"
///     }
/// }
/// ```
pub trait ConversationObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &ConversationEvent);

    /// Observer name for logging.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ConversationObserver) {}
}
