//! Adapter registry.
//!
//! Built once at startup from [`Config`]. Every credential an enabled channel
//! needs is checked here, so a missing secret stops the process before it
//! accepts a single request.

use crate::adapters::{
    ChannelAdapter, ChatAdapter, ChatCredentials, SmsAdapter, SmsCredentials, VoiceAdapter,
    VoiceCredentials,
};
use crate::config::Config;
use crate::domain::ChannelKind;
use crate::error::{ConfigError, ConfigResult};
use crate::metrics::Metrics;
use std::sync::Arc;

/// The adapters enabled for this process, in dispatch order.
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn ChannelAdapter>>,
}

impl AdapterRegistry {
    /// Verify credentials for every enabled channel and construct its adapter.
    pub fn build(config: &Config, metrics: &Metrics) -> ConfigResult<Self> {
        if config.channels.is_empty() {
            return Err(ConfigError::NoChannelsEnabled);
        }

        let timeout = config.request_timeout();
        let mut adapters: Vec<Arc<dyn ChannelAdapter>> = Vec::with_capacity(config.channels.len());

        for kind in &config.channels {
            let adapter: Arc<dyn ChannelAdapter> = match kind {
                ChannelKind::Sms => Arc::new(SmsAdapter::new(
                    sms_credentials(config)?,
                    timeout,
                    metrics.clone(),
                )),
                ChannelKind::Voice => Arc::new(VoiceAdapter::new(
                    voice_credentials(config)?,
                    timeout,
                    metrics.clone(),
                )),
                ChannelKind::Chat => Arc::new(ChatAdapter::new(
                    chat_credentials(config)?,
                    timeout,
                    metrics.clone(),
                )),
            };
            tracing::info!(channel = %kind, "Channel enabled");
            adapters.push(adapter);
        }

        Ok(Self { adapters })
    }

    /// Wrap an explicit adapter list, e.g. custom providers or test doubles.
    pub fn from_adapters(adapters: Vec<Arc<dyn ChannelAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn enabled_adapters(&self) -> &[Arc<dyn ChannelAdapter>] {
        &self.adapters
    }

    pub fn enabled_kinds(&self) -> Vec<ChannelKind> {
        self.adapters.iter().map(|a| a.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

fn require(channel: ChannelKind, field: &str, value: &Option<String>) -> ConfigResult<String> {
    value.clone().ok_or_else(|| ConfigError::MissingCredential {
        channel,
        field: field.to_string(),
    })
}

fn sms_credentials(config: &Config) -> ConfigResult<SmsCredentials> {
    let sms = &config.sms;
    Ok(SmsCredentials {
        api_key: require(ChannelKind::Sms, "BREVO_API_KEY", &sms.api_key)?,
        sender: sms.sender.clone(),
        base_url: sms.base_url.clone(),
    })
}

fn voice_credentials(config: &Config) -> ConfigResult<VoiceCredentials> {
    let voice = &config.voice;
    Ok(VoiceCredentials {
        account_sid: require(ChannelKind::Voice, "EXOTEL_SID", &voice.account_sid)?,
        api_token: require(ChannelKind::Voice, "EXOTEL_TOKEN", &voice.api_token)?,
        virtual_number: require(
            ChannelKind::Voice,
            "EXOTEL_VIRTUAL_NUMBER",
            &voice.virtual_number,
        )?,
        call_flow_url: require(
            ChannelKind::Voice,
            "EXOTEL_CALL_FLOW_URL",
            &voice.call_flow_url,
        )?,
        base_url: voice.base_url.clone(),
    })
}

fn chat_credentials(config: &Config) -> ConfigResult<ChatCredentials> {
    let chat = &config.chat;
    Ok(ChatCredentials {
        account_sid: require(ChannelKind::Chat, "TWILIO_ACCOUNT_SID", &chat.account_sid)?,
        auth_token: require(ChannelKind::Chat, "TWILIO_AUTH_TOKEN", &chat.auth_token)?,
        from_number: require(ChannelKind::Chat, "TWILIO_WHATSAPP_FROM", &chat.from_number)?,
        base_url: chat.base_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_config() -> Config {
        let mut config = Config::default();
        config.channels = vec![ChannelKind::Voice, ChannelKind::Sms, ChannelKind::Chat];
        config.sms.api_key = Some("brevo".to_string());
        config.voice.account_sid = Some("sid".to_string());
        config.voice.api_token = Some("token".to_string());
        config.voice.virtual_number = Some("+918000000000".to_string());
        config.voice.call_flow_url = Some("https://example.com/flow".to_string());
        config.chat.account_sid = Some("AC1".to_string());
        config.chat.auth_token = Some("auth".to_string());
        config.chat.from_number = Some("+14155238886".to_string());
        config
    }

    #[test]
    fn test_build_keeps_configured_order() {
        let registry = AdapterRegistry::build(&full_config(), &Metrics::new()).unwrap();
        assert_eq!(
            registry.enabled_kinds(),
            vec![ChannelKind::Voice, ChannelKind::Sms, ChannelKind::Chat]
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_missing_credential_is_reported_with_channel() {
        let mut config = full_config();
        config.voice.api_token = None;

        match AdapterRegistry::build(&config, &Metrics::new()) {
            Err(ConfigError::MissingCredential { channel, field }) => {
                assert_eq!(channel, ChannelKind::Voice);
                assert_eq!(field, "EXOTEL_TOKEN");
            }
            other => panic!("Expected MissingCredential, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_disabled_channel_credentials_not_required() {
        let mut config = full_config();
        config.channels = vec![ChannelKind::Sms];
        config.voice = Config::default().voice;
        config.chat = Config::default().chat;

        let registry = AdapterRegistry::build(&config, &Metrics::new()).unwrap();
        assert_eq!(registry.enabled_kinds(), vec![ChannelKind::Sms]);
    }

    #[test]
    fn test_no_channels_is_fatal() {
        let mut config = full_config();
        config.channels.clear();
        assert!(matches!(
            AdapterRegistry::build(&config, &Metrics::new()),
            Err(ConfigError::NoChannelsEnabled)
        ));
    }
}
