//! Request validation errors.

use std::fmt;

/// Errors raised while validating an incoming alert request.
///
/// These are always caused by malformed client input and are reported
/// back to the caller as a 400 response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The contacts field is missing, not a list, empty, or holds an entry
    /// that is not a phone number.
    InvalidContacts(String),

    /// The location field is missing or a coordinate is missing or not numeric.
    InvalidLocation(String),
}

impl ValidationError {
    /// Message shown to the caller in the response body.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::InvalidContacts(_) => "Invalid contacts list",
            Self::InvalidLocation(_) => "Invalid location data",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContacts(reason) => write!(f, "Invalid contacts list: {}", reason),
            Self::InvalidLocation(reason) => write!(f, "Invalid location data: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_reason() {
        let err = ValidationError::InvalidContacts("list is empty".to_string());
        assert_eq!(err.to_string(), "Invalid contacts list: list is empty");
        assert_eq!(err.public_message(), "Invalid contacts list");

        let err = ValidationError::InvalidLocation("missing longitude".to_string());
        assert_eq!(err.to_string(), "Invalid location data: missing longitude");
        assert_eq!(err.public_message(), "Invalid location data");
    }
}
