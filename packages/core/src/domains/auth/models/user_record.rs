use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{PhoneNumber, ProfileForm};
use crate::common::generate_user_id;

/// A user account, and while committed to the credential store, the session user.
///
/// Directory records may carry fields this client does not know about (the
/// document id, for one). They are kept in `extra` so a record committed as
/// the session user is exactly what the directory returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_new_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terms_accepted: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    /// Minimal local record for a phone number the directory does not know yet
    pub fn new_shell(phone_number: &PhoneNumber) -> Self {
        Self {
            uid: generate_user_id(),
            phone_number: phone_number.to_string(),
            is_new_user: true,
            created_at: Some(Utc::now()),
            first_name: None,
            last_name: None,
            email: None,
            terms_accepted: None,
            extra: Map::new(),
        }
    }

    /// A committed record must at least name its phone number
    pub fn is_well_formed(&self) -> bool {
        !self.phone_number.trim().is_empty()
    }

    /// Merge registration fields onto this record and stamp `createdAt`.
    pub fn with_profile(&self, profile: &ProfileForm) -> Self {
        let mut merged = self.clone();
        merged.first_name = Some(profile.first_name.trim().to_string());
        merged.last_name = Some(profile.last_name.trim().to_string());
        merged.email = Some(profile.email.trim().to_string());
        merged.terms_accepted = Some(profile.terms_accepted);
        merged.created_at = Some(Utc::now());
        merged
    }

    pub fn display_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }
}
