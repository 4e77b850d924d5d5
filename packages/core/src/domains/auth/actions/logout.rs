//! Logout action

use tracing::info;

use crate::common::{FlowError, FlowResult, Notice};
use crate::kernel::{AuthDeps, SESSION_USER_KEY};
use crate::routes::Route;

pub const LOGGED_OUT_MESSAGE: &str = "Logged out successfully!";

/// Drop the session user. Returns the route to show next.
pub fn logout(deps: &AuthDeps) -> FlowResult<Route> {
    deps.credentials
        .remove(SESSION_USER_KEY)
        .map_err(FlowError::Storage)?;

    info!("Session user signed out");
    deps.notify(Notice::success(LOGGED_OUT_MESSAGE));
    Ok(Route::Login)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::TestDependencies;
    use crate::kernel::{MemoryCredentialStore, PHONE_NUMBER_KEY};

    #[test]
    fn test_logout_clears_only_the_session_user() {
        let credentials = MemoryCredentialStore::new()
            .with_entry(SESSION_USER_KEY, r#"{"uid":"user_1","phoneNumber":"+919876543210"}"#)
            .with_entry(PHONE_NUMBER_KEY, "+919876543210");
        let deps = TestDependencies::new().with_credentials(credentials);

        let next = logout(&deps.deps()).unwrap();

        assert_eq!(next, Route::Login);
        assert_eq!(deps.stored(SESSION_USER_KEY), None);
        assert_eq!(deps.stored(PHONE_NUMBER_KEY).as_deref(), Some("+919876543210"));
        assert_eq!(deps.notifier.last(), Some(Notice::success(LOGGED_OUT_MESSAGE)));
    }
}
