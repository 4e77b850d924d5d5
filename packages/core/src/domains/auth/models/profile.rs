use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::common::{ValidationError, ValidationErrors};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9-]+(\.[A-Z0-9-]+)*\.[A-Z]{2,}$").unwrap();
}

/// Fields collected by the registration form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub terms_accepted: bool,
}

impl ProfileForm {
    /// Check every field; errors come back in form order.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.first_name.trim().is_empty() {
            errors.push(ValidationError::new("firstName", "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(ValidationError::new("lastName", "Last name is required"));
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ValidationError::new("email", "Email is required"));
        } else if !EMAIL_REGEX.is_match(email) {
            errors.push(ValidationError::new("email", "Invalid email"));
        }

        if !self.terms_accepted {
            errors.push(ValidationError::new(
                "termsAccepted",
                "You must accept the terms",
            ));
        }

        errors.into_result()
    }
}
