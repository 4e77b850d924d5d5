use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::ValidationError;

pub const CODE_FIELD: &str = "code";
pub const OTP_CODE_LEN: usize = 6;
pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

/// A 6-digit one-time passcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Build a code from a number in `[100000, 999999]`
    pub fn from_number(value: u32) -> Option<Self> {
        (OTP_MIN..=OTP_MAX)
            .contains(&value)
            .then(|| Self(value.to_string()))
    }

    /// Accept a code read back from storage
    pub fn from_stored(value: &str) -> Option<Self> {
        value
            .parse::<u32>()
            .ok()
            .filter(|_| value.len() == OTP_CODE_LEN)
            .and_then(Self::from_number)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case- and format-sensitive comparison with a submitted code.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Form-level check for the verify screen input.
pub fn validate_code_input(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::new(CODE_FIELD, "OTP is required"));
    }
    if input.chars().count() != OTP_CODE_LEN {
        return Err(ValidationError::new(CODE_FIELD, "OTP must be 6 digits"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_number_range() {
        assert_eq!(OtpCode::from_number(100_000).unwrap().as_str(), "100000");
        assert_eq!(OtpCode::from_number(999_999).unwrap().as_str(), "999999");
        assert!(OtpCode::from_number(99_999).is_none());
        assert!(OtpCode::from_number(1_000_000).is_none());
    }

    #[test]
    fn test_from_stored() {
        assert_eq!(OtpCode::from_stored("482913").unwrap().as_str(), "482913");
        assert!(OtpCode::from_stored("048291").is_none());
        assert!(OtpCode::from_stored("+48291").is_none());
        assert!(OtpCode::from_stored("4829130").is_none());
        assert!(OtpCode::from_stored("").is_none());
    }

    #[test]
    fn test_matches_is_exact() {
        let code = OtpCode::from_number(482_913).unwrap();
        assert!(code.matches("482913"));
        assert!(!code.matches(" 482913"));
        assert!(!code.matches("482913 "));
        assert!(!code.matches("000000"));
    }

    #[test]
    fn test_validate_code_input() {
        assert!(validate_code_input("482913").is_ok());
        assert_eq!(validate_code_input("").unwrap_err().message, "OTP is required");
        assert_eq!(
            validate_code_input("4829").unwrap_err().message,
            "OTP must be 6 digits"
        );
    }
}
