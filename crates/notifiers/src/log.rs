//! Log-only notifier, used when no push service is configured.

use alterego_core::error::NotifyError;
use alterego_core::notify::Notifier;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        info!(notification = %message, "Push notification (log only)");
        Ok(())
    }
}
