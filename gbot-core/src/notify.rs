//! Lead notification side-channel.
//!
//! [`Notifier`] trait is transport-agnostic; [`WhatsAppNotifier`] posts to an HTTP gateway.
//! The engine dispatches notifications on a spawned task, so implementations must bound their
//! own run time; there is no retry anywhere in this path.

use crate::error::{BotError, Result};
use crate::types::Lead;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Fired once per session, at the moment the phone number is captured.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, session_key: &str, lead: &Lead) -> Result<()>;
}

/// Posts the lead as JSON to a WhatsApp gateway endpoint. One bounded
/// attempt; the result is discarded on timeout.
pub struct WhatsAppNotifier {
    client: reqwest::Client,
    gateway_url: String,
}

impl WhatsAppNotifier {
    /// Creates a notifier for the given gateway URL with a fixed 10 s request timeout.
    pub fn new(gateway_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| BotError::Notify(e.to_string()))?;
        Ok(Self {
            client,
            gateway_url,
        })
    }
}

#[async_trait]
impl Notifier for WhatsAppNotifier {
    async fn notify(&self, session_key: &str, lead: &Lead) -> Result<()> {
        let payload = serde_json::json!({
            "session_key": session_key,
            "name": lead.name,
            "phone": lead.phone,
            "language": lead.language.code(),
        });

        self.client
            .post(&self.gateway_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BotError::Notify(e.to_string()))?
            .error_for_status()
            .map_err(|e| BotError::Notify(e.to_string()))?;

        debug!(session_key = %session_key, "Lead forwarded to gateway");
        Ok(())
    }
}

/// Notifier that does nothing; used when no gateway is configured.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _session_key: &str, _lead: &Lead) -> Result<()> {
        Ok(())
    }
}
