//! Geographic location attached to an alert.

use serde::{Deserialize, Serialize};

/// Where the person raising the alert is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Google Maps link pointing at this location.
    pub fn maps_url(&self) -> String {
        format!(
            "https://maps.google.com/?q={},{}",
            self.latitude, self.longitude
        )
    }

    /// True when latitude is within ±90 and longitude within ±180.
    pub fn is_within_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}
