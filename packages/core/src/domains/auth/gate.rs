use std::sync::Arc;

use tracing::{debug, warn};

use super::models::UserRecord;
use crate::common::{FlowError, FlowResult};
use crate::kernel::{AuthDeps, BaseCredentialStore, SESSION_USER_KEY};
use crate::routes::Route;

/// What the host should do with a requested route
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Render {
        route: Route,
        user: Option<UserRecord>,
    },
    Redirect(Route),
}

impl GateDecision {
    /// Route the host ends up on
    pub fn route(&self) -> Route {
        match self {
            GateDecision::Render { route, .. } => *route,
            GateDecision::Redirect(route) => *route,
        }
    }
}

/// Guards the profile routes on the committed session user.
///
/// Reads the credential store on every call; there is no cached session
/// state to go out of sync.
#[derive(Clone)]
pub struct SessionGate {
    credentials: Arc<dyn BaseCredentialStore>,
}

impl SessionGate {
    pub fn new(deps: &AuthDeps) -> Self {
        Self {
            credentials: deps.credentials.clone(),
        }
    }

    /// The committed session user, if any.
    ///
    /// A stored value that does not parse, or parses without a phone number,
    /// is removed and reported as corruption.
    pub fn current_user(&self) -> FlowResult<Option<UserRecord>> {
        let Some(raw) = self
            .credentials
            .get(SESSION_USER_KEY)
            .map_err(FlowError::Storage)?
        else {
            return Ok(None);
        };

        match serde_json::from_str::<UserRecord>(&raw) {
            Ok(user) if user.is_well_formed() => Ok(Some(user)),
            Ok(_) => {
                warn!("Stored session user has no phone number, clearing it");
                self.clear_corrupt()
            }
            Err(e) => {
                warn!("Stored session user is not valid JSON, clearing it: {}", e);
                self.clear_corrupt()
            }
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self.current_user(), Ok(Some(_)))
    }

    /// Decide whether `route` may render. Protected routes without a session
    /// user go to Login.
    pub fn enforce(&self, route: Route) -> GateDecision {
        if !route.is_protected() {
            return GateDecision::Render { route, user: None };
        }

        match self.current_user() {
            Ok(Some(user)) => GateDecision::Render {
                route,
                user: Some(user),
            },
            Ok(None) => {
                debug!("No session user for {}, redirecting to login", route);
                GateDecision::Redirect(Route::Login)
            }
            Err(e) => {
                warn!("Session check for {} failed: {}", route, e);
                GateDecision::Redirect(Route::Login)
            }
        }
    }

    fn clear_corrupt(&self) -> FlowResult<Option<UserRecord>> {
        if let Err(e) = self.credentials.remove(SESSION_USER_KEY) {
            warn!("Failed to clear corrupt session user: {}", e);
        }
        Err(FlowError::StorageCorruption {
            key: SESSION_USER_KEY,
        })
    }
}
