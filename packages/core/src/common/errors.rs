use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// A single form field that failed validation.
///
/// Validation errors are shown inline next to the field and never leave the
/// form layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// All field errors of one form submission, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First error for a field, if any
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

/// Errors surfaced by the sign-in flow.
///
/// None of these are fatal: every failure leaves the flow recoverable or
/// degrades to "return to login".
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("No verification code has been issued")]
    NotIssued,

    #[error("A request for this session is already in progress")]
    Busy,

    #[error("User directory request failed: {0}")]
    Remote(#[source] anyhow::Error),

    #[error("User directory request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Stored value for '{key}' is corrupted")]
    StorageCorruption { key: &'static str },

    #[error("Credential storage error: {0}")]
    Storage(#[source] anyhow::Error),
}

impl FlowError {
    /// Remote failures can be retried by resubmitting the same form.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FlowError::Remote(_) | FlowError::Timeout(_))
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
