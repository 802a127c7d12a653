//! Structural validation of incoming alert requests.
//!
//! Validation is a pure function over the raw JSON body and must finish
//! before any provider is contacted.

use crate::domain::{Contact, Location, ValidationError};
use crate::models::AlertRequest;
use serde_json::Value;

/// Validates raw request bodies into [`AlertRequest`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestValidator {
    /// Also reject coordinates outside ±90 latitude / ±180 longitude.
    pub check_coordinate_range: bool,
}

impl RequestValidator {
    pub fn new(check_coordinate_range: bool) -> Self {
        Self {
            check_coordinate_range,
        }
    }

    pub fn validate(&self, raw: &Value) -> Result<AlertRequest, ValidationError> {
        let contacts = parse_contacts(raw.get("contacts"))?;
        let location = parse_location(raw.get("location"))?;

        if self.check_coordinate_range && !location.is_within_range() {
            return Err(ValidationError::InvalidLocation(format!(
                "coordinates out of range: {}, {}",
                location.latitude, location.longitude
            )));
        }

        Ok(AlertRequest::new(contacts, location))
    }
}

/// Validate with presence-only coordinate checks.
pub fn validate(raw: &Value) -> Result<AlertRequest, ValidationError> {
    RequestValidator::default().validate(raw)
}

fn parse_contacts(value: Option<&Value>) -> Result<Vec<Contact>, ValidationError> {
    let items = match value {
        None | Some(Value::Null) => {
            return Err(ValidationError::InvalidContacts(
                "contacts field is missing".to_string(),
            ))
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ValidationError::InvalidContacts(
                "contacts must be a list".to_string(),
            ))
        }
    };

    if items.is_empty() {
        return Err(ValidationError::InvalidContacts(
            "contacts list is empty".to_string(),
        ));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Contact::new(s.as_str()),
            _ => Err(ValidationError::InvalidContacts(format!(
                "contact at index {} is not a string",
                index
            ))),
        })
        .collect()
}

fn parse_location(value: Option<&Value>) -> Result<Location, ValidationError> {
    let fields = match value {
        Some(Value::Object(fields)) => fields,
        None | Some(Value::Null) => {
            return Err(ValidationError::InvalidLocation(
                "location field is missing".to_string(),
            ))
        }
        Some(_) => {
            return Err(ValidationError::InvalidLocation(
                "location must be an object".to_string(),
            ))
        }
    };

    let coordinate = |name: &str| -> Result<f64, ValidationError> {
        match fields.get(name) {
            None | Some(Value::Null) => Err(ValidationError::InvalidLocation(format!(
                "{} is missing",
                name
            ))),
            Some(Value::Number(n)) => n
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    ValidationError::InvalidLocation(format!("{} is not a finite number", name))
                }),
            Some(_) => Err(ValidationError::InvalidLocation(format!(
                "{} must be a number",
                name
            ))),
        }
    };

    Ok(Location::new(coordinate("latitude")?, coordinate("longitude")?))
}
