use super::models::{OtpCode, PhoneNumber, UserRecord};

/// Verification events - requests from the host and facts from effects
#[derive(Debug, Clone)]
pub enum VerificationEvent {
    /// A fresh code was generated for a phone number (login submit)
    CodeIssued { phone_number: PhoneNumber, code: OtpCode },

    /// Verify screen reopened with a phone number and code already stored
    Resumed { phone_number: PhoneNumber, code: OtpCode },

    /// One second of the resend cooldown elapsed
    Tick,

    /// User asked for a new code; `code` is the replacement
    ResendRequested { code: OtpCode },

    /// User submitted a code
    CodeSubmitted { code: String },

    /// Directory answered: `existing` is false when a new shell was created
    UserResolved { user: UserRecord, existing: bool },

    /// Directory lookup failed or timed out
    LookupFailed,

    /// User navigated back to login
    Abandoned,
}
