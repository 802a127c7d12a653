//! Configuration management for the SOS dispatcher.
//!
//! Settings come from environment variables, with an optional `.env` file
//! loaded first. Parsing only checks that values are well formed; whether
//! an enabled channel has every credential it needs is verified when the
//! adapter registry is built.

use crate::domain::ChannelKind;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_BREVO_BASE_URL: &str = "https://api.brevo.com";
pub const DEFAULT_EXOTEL_BASE_URL: &str = "https://api.exotel.com";
pub const DEFAULT_TWILIO_BASE_URL: &str = "https://api.twilio.com";

/// Upper bound for REQUEST_TIMEOUT and DISPATCH_TIMEOUT, in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Credential bundle for the SMS channel (Brevo).
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub api_key: Option<String>,
    /// Optional sender name; the provider default is used when absent
    pub sender: Option<String>,
    pub base_url: String,
}

/// Credential bundle for the voice channel (Exotel).
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    pub account_sid: Option<String>,
    pub api_token: Option<String>,
    /// Number the call is placed from, also used as caller id
    pub virtual_number: Option<String>,
    /// Publicly reachable call-flow XML endpoint
    pub call_flow_url: Option<String>,
    pub base_url: String,
}

/// Credential bundle for the chat channel (Twilio WhatsApp).
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// WhatsApp-enabled sender number
    pub from_number: Option<String>,
    pub base_url: String,
}

/// Configuration for the SOS dispatcher.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enabled channels, in dispatch order (default: sms,voice)
    pub channels: Vec<ChannelKind>,

    pub sms: SmsConfig,
    pub voice: VoiceConfig,
    pub chat: ChatConfig,

    /// HTTP listen port (default: 3000)
    pub port: u16,

    /// Per provider call timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Whole dispatch cycle timeout in seconds (default: 20)
    pub dispatch_timeout: u64,

    /// Upper bound on simultaneous provider calls per cycle (default: 16)
    pub max_concurrent_sends: usize,

    /// Reject coordinates outside ±90/±180 (default: false)
    pub validate_coordinate_range: bool,

    /// Log level used when RUST_LOG is not set (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// General settings:
    /// - `SOS_CHANNELS`: comma separated list of `sms`, `voice`, `chat` (default: `sms,voice`)
    /// - `PORT`: HTTP port (default: 3000)
    /// - `REQUEST_TIMEOUT`: provider call timeout in seconds (default: 10)
    /// - `DISPATCH_TIMEOUT`: dispatch cycle timeout in seconds (default: 20)
    /// - `MAX_CONCURRENT_SENDS`: concurrent provider calls per cycle (default: 16)
    /// - `SOS_VALIDATE_COORDINATE_RANGE`: `true` to range check coordinates (default: false)
    /// - `LOG_LEVEL`: fallback log filter (default: "info")
    ///
    /// Channel credentials:
    /// - SMS: `BREVO_API_KEY`, `BREVO_SMS_SENDER`, `BREVO_API_BASE_URL`
    /// - Voice: `EXOTEL_SID`, `EXOTEL_TOKEN`, `EXOTEL_VIRTUAL_NUMBER`,
    ///   `EXOTEL_CALL_FLOW_URL`, `EXOTEL_API_BASE_URL`
    /// - Chat: `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`, `TWILIO_WHATSAPP_FROM`,
    ///   `TWILIO_API_BASE_URL`
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let channels = match get("SOS_CHANNELS") {
            Some(raw) => Self::parse_channels(&raw)?,
            None => vec![ChannelKind::Sms, ChannelKind::Voice],
        };

        let sms = SmsConfig {
            api_key: get("BREVO_API_KEY"),
            sender: get("BREVO_SMS_SENDER"),
            base_url: Self::parse_base_url(
                "BREVO_API_BASE_URL",
                get("BREVO_API_BASE_URL"),
                DEFAULT_BREVO_BASE_URL,
            )?,
        };

        let voice = VoiceConfig {
            account_sid: get("EXOTEL_SID"),
            api_token: get("EXOTEL_TOKEN"),
            virtual_number: get("EXOTEL_VIRTUAL_NUMBER"),
            call_flow_url: get("EXOTEL_CALL_FLOW_URL"),
            base_url: Self::parse_base_url(
                "EXOTEL_API_BASE_URL",
                get("EXOTEL_API_BASE_URL"),
                DEFAULT_EXOTEL_BASE_URL,
            )?,
        };

        let chat = ChatConfig {
            account_sid: get("TWILIO_ACCOUNT_SID"),
            auth_token: get("TWILIO_AUTH_TOKEN"),
            from_number: get("TWILIO_WHATSAPP_FROM"),
            base_url: Self::parse_base_url(
                "TWILIO_API_BASE_URL",
                get("TWILIO_API_BASE_URL"),
                DEFAULT_TWILIO_BASE_URL,
            )?,
        };

        let port = Self::parse_var("PORT", get("PORT"), 3000u16)?;
        let request_timeout =
            Self::parse_timeout("REQUEST_TIMEOUT", get("REQUEST_TIMEOUT"), 10)?;
        let dispatch_timeout =
            Self::parse_timeout("DISPATCH_TIMEOUT", get("DISPATCH_TIMEOUT"), 20)?;
        let max_concurrent_sends = Self::parse_var(
            "MAX_CONCURRENT_SENDS",
            get("MAX_CONCURRENT_SENDS"),
            16usize,
        )?;

        if max_concurrent_sends == 0 {
            return Err(ConfigError::InvalidValue {
                var: "MAX_CONCURRENT_SENDS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let validate_coordinate_range = match get("SOS_VALIDATE_COORDINATE_RANGE") {
            Some(raw) => Self::parse_bool("SOS_VALIDATE_COORDINATE_RANGE", &raw)?,
            None => false,
        };

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Config {
            channels,
            sms,
            voice,
            chat,
            port,
            request_timeout,
            dispatch_timeout,
            max_concurrent_sends,
            validate_coordinate_range,
            log_level,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_secs(self.dispatch_timeout)
    }

    /// Parse the channel list, dropping repeats but keeping first-seen order.
    fn parse_channels(raw: &str) -> ConfigResult<Vec<ChannelKind>> {
        let mut channels = Vec::new();
        for name in raw.split(',').filter(|s| !s.trim().is_empty()) {
            let kind = name
                .parse::<ChannelKind>()
                .map_err(|reason| ConfigError::InvalidValue {
                    var: "SOS_CHANNELS".to_string(),
                    reason,
                })?;
            if !channels.contains(&kind) {
                channels.push(kind);
            }
        }
        Ok(channels)
    }

    fn parse_base_url(var: &str, value: Option<String>, default: &str) -> ConfigResult<String> {
        let url = value.unwrap_or_else(|| default.to_string());
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        Ok(url)
    }

    /// Parse an optional value with a default.
    fn parse_var<T: FromStr>(var: &str, value: Option<String>, default: T) -> ConfigResult<T> {
        match value {
            Some(val) => val.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            None => Ok(default),
        }
    }

    /// Parse a timeout in whole seconds, between 1 and `MAX_TIMEOUT_SECS`.
    fn parse_timeout(var: &str, value: Option<String>, default: u64) -> ConfigResult<u64> {
        let secs = Self::parse_var(var, value, default)?;
        if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
            return Err(ConfigError::InvalidValue {
                var: var.to_string(),
                reason: format!("Must be between 1 and {} seconds, got: {}", MAX_TIMEOUT_SECS, secs),
            });
        }
        Ok(secs)
    }

    fn parse_bool(var: &str, value: &str) -> ConfigResult<bool> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                var: var.to_string(),
                reason: format!("Must be true or false, got: {}", value),
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            channels: vec![ChannelKind::Sms, ChannelKind::Voice],
            sms: SmsConfig {
                api_key: None,
                sender: None,
                base_url: DEFAULT_BREVO_BASE_URL.to_string(),
            },
            voice: VoiceConfig {
                account_sid: None,
                api_token: None,
                virtual_number: None,
                call_flow_url: None,
                base_url: DEFAULT_EXOTEL_BASE_URL.to_string(),
            },
            chat: ChatConfig {
                account_sid: None,
                auth_token: None,
                from_number: None,
                base_url: DEFAULT_TWILIO_BASE_URL.to_string(),
            },
            port: 3000,
            request_timeout: 10,
            dispatch_timeout: 20,
            max_concurrent_sends: 16,
            validate_coordinate_range: false,
            log_level: "info".to_string(),
        }
    }
}
