//! WhatsApp chat messages through the Twilio Messages API.

use super::{require_e164, run_blocking, ChannelAdapter};
use crate::client::{ProviderAuth, ProviderClient};
use crate::domain::{ChannelKind, Contact, Location};
use crate::error::AdapterResult;
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::time::Duration;

/// Verified credentials for the chat channel.
#[derive(Debug, Clone)]
pub struct ChatCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub base_url: String,
}

/// Sends the alert as a WhatsApp message (form fields `From`, `To`, `Body`).
pub struct ChatAdapter {
    client: ProviderClient,
    messages_path: String,
    from: String,
}

impl ChatAdapter {
    pub fn new(credentials: ChatCredentials, timeout: Duration, metrics: Metrics) -> Self {
        let messages_path = format!(
            "/2010-04-01/Accounts/{}/Messages.json",
            credentials.account_sid
        );
        let client = ProviderClient::new(
            &credentials.base_url,
            ProviderAuth::Basic {
                username: credentials.account_sid,
                password: credentials.auth_token,
            },
            timeout,
            metrics,
        );

        Self {
            client,
            messages_path,
            from: whatsapp_address(&credentials.from_number),
        }
    }
}

fn whatsapp_address(number: &str) -> String {
    if number.starts_with("whatsapp:") {
        number.to_string()
    } else {
        format!("whatsapp:{}", number)
    }
}

#[async_trait]
impl ChannelAdapter for ChatAdapter {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Chat
    }

    async fn send(
        &self,
        contact: &Contact,
        _location: &Location,
        message_body: &str,
    ) -> AdapterResult<()> {
        let to = whatsapp_address(&require_e164(ChannelKind::Chat, contact)?);
        let client = self.client.clone();
        let path = self.messages_path.clone();
        let from = self.from.clone();
        let body = message_body.to_string();

        run_blocking(move || {
            client.post_form(
                &path,
                &[
                    ("From", from.as_str()),
                    ("To", to.as_str()),
                    ("Body", body.as_str()),
                ],
            )
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whatsapp_address_prefix_added_once() {
        assert_eq!(whatsapp_address("+14155238886"), "whatsapp:+14155238886");
        assert_eq!(
            whatsapp_address("whatsapp:+14155238886"),
            "whatsapp:+14155238886"
        );
    }
}
