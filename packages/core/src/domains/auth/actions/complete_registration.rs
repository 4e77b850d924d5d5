//! Complete registration action

use tracing::{error, info, instrument, warn};

use crate::common::{FlowError, FlowResult, Notice};
use crate::domains::auth::models::{ProfileForm, UserRecord};
use crate::kernel::{AuthDeps, SESSION_USER_KEY};

pub const ACCOUNT_CREATED_MESSAGE: &str = "Account created successfully!";
pub const ACCOUNT_FAILED_MESSAGE: &str = "Failed to create account. Please try again.";

/// Merge the profile onto the session user, write it to the directory and
/// commit it as the new session user.
///
/// Nothing is written when the profile is invalid. If the directory write
/// fails the previous session user stays in place.
#[instrument(skip_all, fields(uid = %draft.uid))]
pub async fn complete_registration(
    draft: &UserRecord,
    profile: &ProfileForm,
    deps: &AuthDeps,
) -> FlowResult<UserRecord> {
    if let Err(errors) = profile.validate() {
        warn!("Registration form rejected: {}", errors);
        return Err(FlowError::Validation(errors));
    }

    let record = draft.with_profile(profile);

    if let Err(e) = deps
        .remote(deps.directory.write(&record.uid, &record))
        .await
    {
        error!("Failed to write user {}: {}", record.uid, e);
        deps.notify(Notice::error(ACCOUNT_FAILED_MESSAGE));
        return Err(e);
    }

    let json = serde_json::to_string(&record).map_err(|e| FlowError::Storage(e.into()))?;
    deps.credentials
        .set(SESSION_USER_KEY, &json)
        .map_err(FlowError::Storage)?;

    info!("Registered user {} ({})", record.uid, record.phone_number);
    deps.notify(Notice::success(ACCOUNT_CREATED_MESSAGE));
    Ok(record)
}
