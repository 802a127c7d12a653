//! SMS delivery through the Brevo transactional SMS API.

use super::{run_blocking, ChannelAdapter};
use crate::client::{ProviderAuth, ProviderClient};
use crate::domain::{ChannelKind, Contact, Location};
use crate::error::AdapterResult;
use crate::metrics::Metrics;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

const SEND_PATH: &str = "/v3/sms/send";

/// Verified credentials for the SMS channel.
#[derive(Debug, Clone)]
pub struct SmsCredentials {
    pub api_key: String,
    pub sender: Option<String>,
    pub base_url: String,
}

/// Sends the alert as a text message. Body is JSON `{ to, content, sender? }`.
pub struct SmsAdapter {
    client: ProviderClient,
    sender: Option<String>,
}

impl SmsAdapter {
    pub fn new(credentials: SmsCredentials, timeout: Duration, metrics: Metrics) -> Self {
        let client = ProviderClient::new(
            &credentials.base_url,
            ProviderAuth::Bearer(credentials.api_key),
            timeout,
            metrics,
        );

        Self {
            client,
            sender: credentials.sender,
        }
    }

    /// Brevo expects the recipient without punctuation.
    fn payload(&self, contact: &Contact, message_body: &str) -> serde_json::Value {
        let to = contact.e164().unwrap_or_else(|| contact.digits_only());
        let mut body = json!({
            "to": to,
            "content": message_body,
        });
        if let Some(sender) = &self.sender {
            body["sender"] = json!(sender);
        }
        body
    }
}

#[async_trait]
impl ChannelAdapter for SmsAdapter {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Sms
    }

    async fn send(
        &self,
        contact: &Contact,
        _location: &Location,
        message_body: &str,
    ) -> AdapterResult<()> {
        let body = self.payload(contact, message_body);
        let client = self.client.clone();

        run_blocking(move || client.post_json(SEND_PATH, &body)).await
    }
}
