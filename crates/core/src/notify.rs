//! Notifier trait: the abstraction over outbound push notifications.
//!
//! Tools use a notifier to tell the person behind the persona that something
//! happened (a visitor left contact details, a question went unanswered).

use async_trait::async_trait;
use crate::error::NotifyError;

/// Sends a short text notification to the persona's owner.
///
/// Implementations: Pushover, log-only.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A human-readable name for this notifier (e.g., "pushover", "log").
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}
