//! Push notification delivery for alterego.
//!
//! Available notifiers:
//! - **Pushover**: form POST to the Pushover messages API
//! - **Log**: writes the notification to the log (no credentials needed)
//!
//! Tools never call a notifier directly; they go through the
//! [`NotificationDispatcher`], which sends in the background.

pub mod dispatcher;
pub mod log;
pub mod pushover;

pub use dispatcher::NotificationDispatcher;
pub use log::LogNotifier;
pub use pushover::{PushoverConfig, PushoverNotifier};

use alterego_core::notify::Notifier;
use std::sync::Arc;

/// Pick a notifier from configuration.
///
/// Pushover when both credentials are present, otherwise log-only.
pub fn build_from_config(config: &alterego_config::NotificationConfig) -> Arc<dyn Notifier> {
    match (&config.pushover_user, &config.pushover_token) {
        (Some(user), Some(token)) => Arc::new(PushoverNotifier::new(PushoverConfig {
            user: user.clone(),
            token: token.clone(),
            url: config.pushover_url.clone(),
        })),
        _ => {
            tracing::warn!("Pushover credentials not set, notifications will only be logged");
            Arc::new(LogNotifier)
        }
    }
}
