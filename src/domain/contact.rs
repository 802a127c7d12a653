//! Contact value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single alert destination: a phone-number-shaped string.
///
/// Validation is syntactic only. Whether a provider can actually reach the
/// number is decided by each channel adapter (voice and chat need a
/// country code, for instance).
///
/// # Example
///
/// ```
/// use sos_dispatch::domain::Contact;
///
/// let contact = Contact::new("+1 (555) 000-1234").unwrap();
/// assert_eq!(contact.digits_only(), "15550001234");
/// assert!(contact.has_country_code());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact(String);

impl Contact {
    /// Create a new Contact, validating the format.
    ///
    /// # Validation Rules
    ///
    /// - Must not be empty or whitespace
    /// - Must contain at least one digit
    /// - Can contain: digits, spaces, hyphens, parentheses, plus sign, periods
    ///
    /// Surrounding whitespace is trimmed.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();
        let trimmed = phone.trim();

        if !Self::is_valid(trimmed) {
            return Err(ValidationError::InvalidContacts(format!(
                "not a phone number: {:?}",
                phone
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    fn is_valid(phone: &str) -> bool {
        if phone.is_empty() {
            return false;
        }

        if !phone.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }

        phone.chars().all(|c| {
            c.is_ascii_digit()
                || c == ' '
                || c == '-'
                || c == '('
                || c == ')'
                || c == '+'
                || c == '.'
        })
    }

    /// Get the contact as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the number with only digits (no formatting).
    pub fn digits_only(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }

    /// True when the number starts with an international `+` prefix.
    pub fn has_country_code(&self) -> bool {
        self.0.starts_with('+')
    }

    /// E.164 form (`+` followed by digits), if the number carries a country code.
    pub fn e164(&self) -> Option<String> {
        self.has_country_code()
            .then(|| format!("+{}", self.digits_only()))
    }

    /// Form safe for log output: everything but the last four digits is hidden.
    pub fn masked(&self) -> String {
        let digits = self.digits_only();
        let visible = digits.len().saturating_sub(4);
        format!("***{}", &digits[visible..])
    }
}

impl Serialize for Contact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Contact {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Contact::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_valid() {
        let contact = Contact::new("+15550001").unwrap();
        assert_eq!(contact.as_str(), "+15550001");
    }

    #[test]
    fn test_contact_validates_format() {
        assert!(Contact::new("").is_err());
        assert!(Contact::new("   ").is_err());
        assert!(Contact::new("no digits").is_err());
        assert!(Contact::new("invalid@phone").is_err());
        assert!(Contact::new("123-456-7890").is_ok());
        assert!(Contact::new("+1 (555) 123-4567").is_ok());
        assert!(Contact::new("555.123.4567").is_ok());
    }

    #[test]
    fn test_contact_trims_whitespace() {
        let contact = Contact::new("  +15550001 ").unwrap();
        assert_eq!(contact.as_str(), "+15550001");
    }

    #[test]
    fn test_country_code_and_e164() {
        let local = Contact::new("555-0001").unwrap();
        assert!(!local.has_country_code());
        assert_eq!(local.e164(), None);

        let intl = Contact::new("+91 98450 12345").unwrap();
        assert!(intl.has_country_code());
        assert_eq!(intl.e164().as_deref(), Some("+919845012345"));
    }

    #[test]
    fn test_masked_hides_all_but_last_four() {
        let contact = Contact::new("+15550001234").unwrap();
        assert_eq!(contact.masked(), "***1234");

        let short = Contact::new("12").unwrap();
        assert_eq!(short.masked(), "***12");
    }

    #[test]
    fn test_contact_serde() {
        let contact = Contact::new("+15550001").unwrap();
        assert_eq!(serde_json::to_string(&contact).unwrap(), "\"+15550001\"");

        let parsed: Contact = serde_json::from_str("\"+15550002\"").unwrap();
        assert_eq!(parsed.as_str(), "+15550002");

        let invalid: Result<Contact, _> = serde_json::from_str("\"call me\"");
        assert!(invalid.is_err());
    }
}
