//! Pushover notifier.
//!
//! Sends a form-encoded POST to the Pushover messages API. Pushover answers
//! `200` with `{"status":1}` on success; anything else is a rejection.

use alterego_core::error::NotifyError;
use alterego_core::notify::Notifier;
use async_trait::async_trait;
use tracing::debug;

/// Pushover credentials and endpoint.
#[derive(Clone)]
pub struct PushoverConfig {
    pub user: String,
    pub token: String,
    pub url: String,
}

impl std::fmt::Debug for PushoverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushoverConfig")
            .field("user", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .field("url", &self.url)
            .finish()
    }
}

pub struct PushoverNotifier {
    config: PushoverConfig,
    client: reqwest::Client,
}

impl PushoverNotifier {
    pub fn new(config: PushoverConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { config, client }
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    fn name(&self) -> &str {
        "pushover"
    }

    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        debug!(chars = message.len(), "Sending Pushover notification");

        let form = [
            ("user", self.config.user.as_str()),
            ("token", self.config.token.as_str()),
            ("message", message),
        ];

        let response = self
            .client
            .post(&self.config.url)
            .form(&form)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(NotifyError::Rejected {
            status_code: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        })
    }
}
