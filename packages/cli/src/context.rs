//! Application context shared by every view

use anyhow::{Context, Result};
use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use tracing::{info, warn};
use travelwise_core::domains::auth::models::UserRecord;
use travelwise_core::domains::auth::{RandomOtpIssuer, SessionGate};
use travelwise_core::kernel::{
    AuthDeps, BaseUserDirectory, FileCredentialStore, FirestoreUserDirectory, MemoryUserDirectory,
};
use travelwise_core::Config;

use crate::notifier::ConsoleNotifier;

pub struct AppContext {
    pub config: Config,
    pub deps: AuthDeps,
    pub gate: SessionGate,
    pub term: Term,
}

impl AppContext {
    pub fn new(config: Config, offline: bool) -> Result<Self> {
        let credentials = FileCredentialStore::open(&config.credentials_path).with_context(|| {
            format!(
                "Failed to open credential store at {}",
                config.credentials_path.display()
            )
        })?;

        let directory: Arc<dyn BaseUserDirectory> = match (&config.firestore, offline) {
            (Some(firestore), false) => {
                info!("Using Firestore project {}", firestore.project_id);
                Arc::new(FirestoreUserDirectory::new(firestore.clone()))
            }
            (Some(_), true) => {
                info!("Offline mode: users are kept in memory");
                Arc::new(MemoryUserDirectory::new())
            }
            (None, _) => {
                warn!("FIRESTORE_PROJECT_ID not set, users are kept in memory for this run");
                Arc::new(MemoryUserDirectory::new())
            }
        };

        let deps = AuthDeps::new(
            Arc::new(credentials),
            directory,
            Arc::new(ConsoleNotifier::new()),
            Arc::new(RandomOtpIssuer),
        )
        .with_remote_timeout(config.remote_timeout);
        let gate = SessionGate::new(&deps);

        Ok(Self {
            config,
            deps,
            gate,
            term: Term::stdout(),
        })
    }

    /// Restore the stored session user at startup. A corrupt one is cleared
    /// so the route loop starts from a clean store.
    pub fn restore_session(&self) -> Option<UserRecord> {
        match self.gate.current_user() {
            Ok(user) => user,
            Err(e) => {
                warn!("Stored session discarded: {}", e);
                None
            }
        }
    }

    pub fn theme(&self) -> ColorfulTheme {
        ColorfulTheme::default()
    }

    pub fn print_banner(&self) -> Result<()> {
        self.term.clear_screen()?;
        println!("{}", style("╔══════════════════════════════╗").cyan());
        println!("{}", style("║          Travelwise          ║").cyan());
        println!("{}", style("╚══════════════════════════════╝").cyan());
        println!();
        Ok(())
    }

    pub fn print_header(&self, msg: &str) {
        println!();
        println!("{}", style(msg).bold());
    }

    pub fn print_warning(&self, msg: &str) {
        println!("{}", style(msg).yellow());
    }

    pub fn print_info(&self, msg: &str) {
        println!("{}", style(msg).cyan());
    }

    pub fn print_dim(&self, msg: &str) {
        println!("{}", style(msg).dim());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;
    use travelwise_core::kernel::{BaseCredentialStore, SESSION_USER_KEY};

    pub(crate) fn offline_context() -> (TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            credentials_path: dir.path().join("credentials.json"),
            ..Config::default()
        };
        let ctx = AppContext::new(config, true).unwrap();
        (dir, ctx)
    }

    #[test]
    fn test_restore_session_clears_corrupt_user() {
        let (_dir, ctx) = offline_context();
        ctx.deps
            .credentials
            .set(SESSION_USER_KEY, "{not json")
            .unwrap();

        assert_eq!(ctx.restore_session(), None);
        assert_eq!(ctx.deps.credentials.get(SESSION_USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_restore_session_without_user() {
        let (_dir, ctx) = offline_context();

        assert_eq!(ctx.restore_session(), None);
        assert!(!ctx.gate.is_authorized());
    }
}
