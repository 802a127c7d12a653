//! The alert request handled by one dispatch cycle.

use crate::domain::{Contact, Location};
use serde::{Deserialize, Serialize};

/// A validated SOS request: who to alert and where the sender is.
///
/// Built by the request validator, owned by a single dispatch cycle and
/// dropped when the response is rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRequest {
    /// Destinations, in the order the caller supplied them
    pub contacts: Vec<Contact>,
    pub location: Location,
}

impl AlertRequest {
    pub fn new(contacts: Vec<Contact>, location: Location) -> Self {
        Self { contacts, location }
    }

    /// Render the alert body sent on every channel.
    pub fn alert_message(&self) -> String {
        render_alert_message(&self.location)
    }
}

/// The fixed alert template with the location interpolated as a map link.
pub fn render_alert_message(location: &Location) -> String {
    format!(
        "🚨 EMERGENCY! HELP NEEDED 🚨\nLocation: {}",
        location.maps_url()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_message_contains_map_link() {
        let request = AlertRequest::new(
            vec![Contact::new("+15550001").unwrap()],
            Location::new(12.9, 77.6),
        );
        assert_eq!(
            request.alert_message(),
            "🚨 EMERGENCY! HELP NEEDED 🚨\nLocation: https://maps.google.com/?q=12.9,77.6"
        );
    }
}
