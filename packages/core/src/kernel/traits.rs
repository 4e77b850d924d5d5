// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The verification and registration rules live in domains/auth and only
// reach the outside world through these seams.
//
// Naming convention: Base* for trait names (e.g., BaseUserDirectory)

use anyhow::Result;
use async_trait::async_trait;

use crate::common::Notice;
use crate::domains::auth::issuer::RESEND_COOLDOWN_SECS;
use crate::domains::auth::models::{OtpCode, PhoneNumber, UserRecord};

// =============================================================================
// Credential Store Trait (Infrastructure - local persisted strings)
// =============================================================================

/// Persisted phone number of the pending verification
pub const PHONE_NUMBER_KEY: &str = "phoneNumber";
/// Persisted pending code
pub const PENDING_CODE_KEY: &str = "dummyOTP";
/// JSON-serialized session user
pub const SESSION_USER_KEY: &str = "user";

/// Durable string key-value store that survives process restarts.
///
/// No TTL: callers remove what they no longer need.
pub trait BaseCredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

// =============================================================================
// User Directory Trait (Infrastructure - remote document store)
// =============================================================================

/// Name of the remote collection holding user records
pub const USERS_COLLECTION: &str = "users";

#[async_trait]
pub trait BaseUserDirectory: Send + Sync {
    /// Look up the record registered for a phone number
    async fn find_by_phone_number(&self, phone_number: &PhoneNumber) -> Result<Option<UserRecord>>;

    /// Create or replace the record stored under `uid`
    async fn write(&self, uid: &str, record: &UserRecord) -> Result<()>;
}

// =============================================================================
// Notifier Trait (Infrastructure - toasts)
// =============================================================================

/// Fire-and-forget user-visible messages. Implementations must not block.
pub trait BaseNotifier: Send + Sync {
    fn emit(&self, notice: Notice);
}

// =============================================================================
// OTP Issuer Trait (Infrastructure - code source)
// =============================================================================

/// Source of one-time codes.
///
/// The random issuer stands in for an SMS backend; a real backend would sit
/// behind this trait without touching the verification machine.
pub trait BaseOtpIssuer: Send + Sync {
    fn issue(&self) -> OtpCode;

    /// Seconds before a code may be re-sent
    fn cooldown_duration(&self) -> u32 {
        RESEND_COOLDOWN_SECS
    }
}
