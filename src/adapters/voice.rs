//! Voice calls through the Exotel call-connect API.

use super::{require_e164, run_blocking, ChannelAdapter};
use crate::client::{ProviderAuth, ProviderClient};
use crate::domain::{ChannelKind, Contact, Location};
use crate::error::AdapterResult;
use crate::metrics::Metrics;
use async_trait::async_trait;
use std::time::Duration;

/// Verified credentials for the voice channel.
#[derive(Debug, Clone)]
pub struct VoiceCredentials {
    pub account_sid: String,
    pub api_token: String,
    pub virtual_number: String,
    pub call_flow_url: String,
    pub base_url: String,
}

/// Places an outbound call that plays the configured call flow.
///
/// The request is form encoded with `From`, `To`, `CallerId` and `Url`. The
/// virtual number is used both as the originating number and the caller id.
/// The spoken content is defined by the call flow, not by the alert body.
pub struct VoiceAdapter {
    client: ProviderClient,
    connect_path: String,
    virtual_number: String,
    call_flow_url: String,
}

impl VoiceAdapter {
    pub fn new(credentials: VoiceCredentials, timeout: Duration, metrics: Metrics) -> Self {
        let connect_path = format!("/v1/Accounts/{}/Calls/connect", credentials.account_sid);
        let client = ProviderClient::new(
            &credentials.base_url,
            ProviderAuth::Basic {
                username: credentials.account_sid,
                password: credentials.api_token,
            },
            timeout,
            metrics,
        );

        Self {
            client,
            connect_path,
            virtual_number: credentials.virtual_number,
            call_flow_url: credentials.call_flow_url,
        }
    }
}

#[async_trait]
impl ChannelAdapter for VoiceAdapter {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Voice
    }

    async fn send(
        &self,
        contact: &Contact,
        _location: &Location,
        _message_body: &str,
    ) -> AdapterResult<()> {
        let to = require_e164(ChannelKind::Voice, contact)?;
        let client = self.client.clone();
        let path = self.connect_path.clone();
        let from = self.virtual_number.clone();
        let flow_url = self.call_flow_url.clone();

        run_blocking(move || {
            client.post_form(
                &path,
                &[
                    ("From", from.as_str()),
                    ("To", to.as_str()),
                    ("CallerId", from.as_str()),
                    ("Url", flow_url.as_str()),
                ],
            )
        })
        .await
    }
}
