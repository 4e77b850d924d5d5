use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::common::ValidationError;

pub const PHONE_FIELD: &str = "phoneNumber";
pub const LOCAL_DIGITS: usize = 10;

lazy_static! {
    // Local part as typed on the login form
    static ref LOCAL_PHONE_REGEX: Regex = Regex::new(r"^[0-9]{10}$").unwrap();

    // Normalized form: country prefix followed by the 10 local digits
    static ref NORMALIZED_PHONE_REGEX: Regex = Regex::new(r"^\+[0-9]{1,4}[0-9]{10}$").unwrap();
}

/// Phone number normalized to `<country prefix><10 digits>`, e.g. `+919876543210`.
///
/// Immutable once a code has been issued for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate the login form input and prefix it.
    pub fn parse(input: &str, country_prefix: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::new(PHONE_FIELD, "Phone number is required"));
        }
        if !LOCAL_PHONE_REGEX.is_match(input) {
            return Err(ValidationError::new(
                PHONE_FIELD,
                "Phone number must be 10 digits",
            ));
        }
        Ok(Self(format!("{}{}", country_prefix, input)))
    }

    /// Accept an already-normalized number read back from storage.
    pub fn from_normalized(value: &str) -> Option<Self> {
        NORMALIZED_PHONE_REGEX
            .is_match(value)
            .then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 10 digits without the country prefix
    pub fn local_digits(&self) -> &str {
        &self.0[self.0.len() - LOCAL_DIGITS..]
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefixes_ten_digits() {
        let phone = PhoneNumber::parse("9876543210", "+91").unwrap();
        assert_eq!(phone.as_str(), "+919876543210");
        assert_eq!(phone.local_digits(), "9876543210");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let phone = PhoneNumber::parse("  9876543210 ", "+91").unwrap();
        assert_eq!(phone.as_str(), "+919876543210");
    }

    #[test]
    fn test_parse_requires_input() {
        let err = PhoneNumber::parse("   ", "+91").unwrap_err();
        assert_eq!(err.field, PHONE_FIELD);
        assert_eq!(err.message, "Phone number is required");
    }

    #[test]
    fn test_parse_rejects_wrong_length_and_non_digits() {
        for input in ["987654321", "98765432101", "98765a3210", "+919876543210"] {
            let err = PhoneNumber::parse(input, "+91").unwrap_err();
            assert_eq!(err.message, "Phone number must be 10 digits", "input {input}");
        }
    }

    #[test]
    fn test_from_normalized() {
        assert!(PhoneNumber::from_normalized("+919876543210").is_some());
        assert!(PhoneNumber::from_normalized("+15551234567").is_some());
        assert!(PhoneNumber::from_normalized("9876543210").is_none());
        assert!(PhoneNumber::from_normalized("+91987").is_none());
    }
}
