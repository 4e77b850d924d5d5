//! Dependencies for the auth domain (using traits for testability)
//!
//! Every external collaborator of the sign-in flow is reached through this
//! container.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::{BaseCredentialStore, BaseNotifier, BaseOtpIssuer, BaseUserDirectory};
use crate::common::{FlowError, FlowResult, Notice};
use crate::config::DEFAULT_REMOTE_TIMEOUT_SECS;

/// Auth dependencies accessible to the session, the gate and the actions
#[derive(Clone)]
pub struct AuthDeps {
    pub credentials: Arc<dyn BaseCredentialStore>,
    pub directory: Arc<dyn BaseUserDirectory>,
    pub notifier: Arc<dyn BaseNotifier>,
    pub issuer: Arc<dyn BaseOtpIssuer>,
    /// Upper bound on every user directory call
    pub remote_timeout: Duration,
}

impl AuthDeps {
    pub fn new(
        credentials: Arc<dyn BaseCredentialStore>,
        directory: Arc<dyn BaseUserDirectory>,
        notifier: Arc<dyn BaseNotifier>,
        issuer: Arc<dyn BaseOtpIssuer>,
    ) -> Self {
        Self {
            credentials,
            directory,
            notifier,
            issuer,
            remote_timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
        }
    }

    pub fn with_remote_timeout(mut self, remote_timeout: Duration) -> Self {
        self.remote_timeout = remote_timeout;
        self
    }

    pub fn notify(&self, notice: Notice) {
        self.notifier.emit(notice);
    }

    /// Run a user directory call under the remote timeout.
    pub async fn remote<T, F>(&self, call: F) -> FlowResult<T>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        match tokio::time::timeout(self.remote_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(FlowError::Remote(e)),
            Err(_) => {
                warn!("User directory call exceeded {:?}", self.remote_timeout);
                Err(FlowError::Timeout(self.remote_timeout))
            }
        }
    }
}
