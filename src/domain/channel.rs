//! Notification channel kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Delivery mechanism an adapter is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelKind {
    Sms,
    Voice,
    Chat,
}

impl ChannelKind {
    pub const ALL: [ChannelKind; 3] = [ChannelKind::Sms, ChannelKind::Voice, ChannelKind::Chat];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelKind::Sms => "sms",
            ChannelKind::Voice => "voice",
            ChannelKind::Chat => "chat",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sms" | "text" => Ok(ChannelKind::Sms),
            "voice" | "call" => Ok(ChannelKind::Voice),
            "chat" | "whatsapp" => Ok(ChannelKind::Chat),
            other => Err(format!("unknown channel: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_names() {
        assert_eq!("sms".parse::<ChannelKind>(), Ok(ChannelKind::Sms));
        assert_eq!(" Voice ".parse::<ChannelKind>(), Ok(ChannelKind::Voice));
        assert_eq!("whatsapp".parse::<ChannelKind>(), Ok(ChannelKind::Chat));
        assert!("pager".parse::<ChannelKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for kind in ChannelKind::ALL {
            assert_eq!(kind.to_string().parse::<ChannelKind>(), Ok(kind));
        }
    }
}
