use super::models::{OtpCode, PhoneNumber, UserRecord};
use crate::routes::Route;

/// Verification commands - IO the session performs for the machine
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationCommand {
    /// Persist {phone, code}, show the code, restart the countdown
    DeliverCode {
        phone_number: PhoneNumber,
        code: OtpCode,
        resent: bool,
    },

    /// (Re)start the countdown without touching storage
    StartCountdown,

    /// Countdown reached zero
    StopCountdown,

    /// Code matched: find the directory record for this phone number
    LookupUser { phone_number: PhoneNumber },

    /// Code did not match
    RejectCode,

    /// Consume the pending code, commit `user` as the session user
    CommitSession {
        user: UserRecord,
        existing: bool,
        next: Route,
    },

    /// Lookup failed; session is back in Issued
    ReportLookupFailure,

    /// Session discarded; cancel the countdown, keep the stored code
    Discard,
}
