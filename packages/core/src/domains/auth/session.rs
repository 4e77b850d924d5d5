//! Verification session - owns the machine and executes its commands.
//!
//! One session per verify screen. The host feeds it user actions and
//! countdown ticks one at a time (`&mut self`), so a second verify can never
//! start while a directory lookup is still in flight.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, trace, warn};

use super::commands::VerificationCommand;
use super::events::VerificationEvent;
use super::machines::{Phase, VerificationMachine};
use super::models::{OtpCode, PhoneNumber, UserRecord};
use crate::common::{FlowError, FlowResult, Notice};
use crate::kernel::{
    AuthDeps, CountdownTick, CountdownTimer, Machine, PENDING_CODE_KEY, PHONE_NUMBER_KEY,
    SESSION_USER_KEY,
};
use crate::routes::Route;

const TICK_PERIOD: Duration = Duration::from_secs(1);

pub const ISSUE_FAILED_MESSAGE: &str = "Failed to send OTP. Please try again.";
pub const RESEND_FAILED_MESSAGE: &str = "Failed to resend OTP. Please try again.";
pub const LOOKUP_FAILED_MESSAGE: &str = "Unable to verify right now. Please try again.";
pub const RETURNING_USER_MESSAGE: &str = "Login successful!";
pub const NEW_USER_MESSAGE: &str = "Verification successful!";

/// Result of a successful verification. The host navigates to `next`.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOutcome {
    pub user: UserRecord,
    /// The directory already knew this phone number
    pub existing: bool,
    pub next: Route,
}

/// What the verify screen renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub phone_number: Option<PhoneNumber>,
    pub countdown: u32,
    pub resend_available: bool,
    pub last_attempt_failed: bool,
}

pub struct VerificationSession {
    deps: AuthDeps,
    machine: VerificationMachine,
    ticks: UnboundedSender<CountdownTick>,
    timer: Option<CountdownTimer>,
    /// Bumped every time the countdown restarts or stops
    generation: u64,
}

impl VerificationSession {
    /// Empty session. Countdown ticks are posted to `ticks`; the host hands
    /// them back through [`VerificationSession::tick`].
    pub fn new(deps: AuthDeps, ticks: UnboundedSender<CountdownTick>) -> Self {
        let cooldown = deps.issuer.cooldown_duration();
        Self {
            deps,
            machine: VerificationMachine::new(cooldown),
            ticks,
            timer: None,
            generation: 0,
        }
    }

    /// Reopen the verify screen from the stored phone number and code.
    ///
    /// Returns `None` when either is missing or unreadable; the host sends
    /// the user back to login.
    pub fn resume(deps: AuthDeps, ticks: UnboundedSender<CountdownTick>) -> FlowResult<Option<Self>> {
        let stored_phone = deps
            .credentials
            .get(PHONE_NUMBER_KEY)
            .map_err(FlowError::Storage)?;
        let stored_code = deps
            .credentials
            .get(PENDING_CODE_KEY)
            .map_err(FlowError::Storage)?;

        let phone_number = stored_phone.as_deref().and_then(PhoneNumber::from_normalized);
        let code = stored_code.as_deref().and_then(OtpCode::from_stored);
        let (Some(phone_number), Some(code)) = (phone_number, code) else {
            debug!("No pending verification to resume");
            return Ok(None);
        };

        let mut session = Self::new(deps, ticks);
        let event = VerificationEvent::Resumed {
            phone_number: phone_number.clone(),
            code,
        };
        if let Some(VerificationCommand::StartCountdown) = session.machine.decide(&event) {
            session.restart_countdown();
        }
        info!("Resumed verification for {}", phone_number);
        Ok(Some(session))
    }

    /// Issue a code for `phone_number`: persist it, show it, start the
    /// cooldown.
    pub fn issue(&mut self, phone_number: PhoneNumber) -> FlowResult<OtpCode> {
        if !self.machine.accepts_issue() {
            return Err(FlowError::Busy);
        }

        let code = self.deps.issuer.issue();
        let before = self.machine.clone();
        let event = VerificationEvent::CodeIssued {
            phone_number,
            code: code.clone(),
        };

        match self.machine.decide(&event) {
            Some(VerificationCommand::DeliverCode {
                phone_number,
                code,
                resent,
            }) => {
                if let Err(e) = self.deliver(&phone_number, &code, resent) {
                    self.machine = before;
                    error!("Failed to store code for {}: {}", phone_number, e);
                    self.deps.notify(Notice::error(ISSUE_FAILED_MESSAGE));
                    return Err(e);
                }
                info!("Issued verification code for {}", phone_number);
                Ok(code)
            }
            _ => Err(FlowError::Busy),
        }
    }

    /// Apply one countdown tick. Ticks from a countdown that has since been
    /// restarted or stopped are ignored.
    pub fn tick(&mut self, tick: CountdownTick) {
        if tick.generation != self.generation || self.timer.is_none() {
            trace!(
                tick = tick.generation,
                current = self.generation,
                "ignoring stale countdown tick"
            );
            return;
        }

        if let Some(VerificationCommand::StopCountdown) =
            self.machine.decide(&VerificationEvent::Tick)
        {
            debug!("Resend cooldown finished");
            self.stop_countdown();
        }
    }

    /// Send a new code once the cooldown is over. Returns `None` (and changes
    /// nothing) while the cooldown is still running.
    pub fn resend(&mut self) -> FlowResult<Option<OtpCode>> {
        if self.machine.phase() != Phase::Issued || !self.machine.resend_available() {
            debug!(
                countdown = self.machine.countdown(),
                "Resend requested during cooldown, ignoring"
            );
            return Ok(None);
        }

        let code = self.deps.issuer.issue();
        let before = self.machine.clone();

        match self
            .machine
            .decide(&VerificationEvent::ResendRequested { code })
        {
            Some(VerificationCommand::DeliverCode {
                phone_number,
                code,
                resent,
            }) => {
                if let Err(e) = self.deliver(&phone_number, &code, resent) {
                    self.machine = before;
                    error!("Failed to store new code for {}: {}", phone_number, e);
                    self.deps.notify(Notice::error(RESEND_FAILED_MESSAGE));
                    return Err(e);
                }
                info!("Re-sent verification code for {}", phone_number);
                Ok(Some(code))
            }
            _ => Ok(None),
        }
    }

    /// Check a submitted code and, on a match, resolve and commit the
    /// session user.
    pub async fn verify(&mut self, submitted: &str) -> FlowResult<VerifyOutcome> {
        match self.machine.phase() {
            Phase::Issued => {}
            Phase::Verifying => return Err(FlowError::Busy),
            Phase::Idle | Phase::Verified => return Err(FlowError::NotIssued),
        }

        let before = self.machine.clone();
        let event = VerificationEvent::CodeSubmitted {
            code: submitted.to_string(),
        };

        let phone_number = match self.machine.decide(&event) {
            Some(VerificationCommand::LookupUser { phone_number }) => phone_number,
            Some(VerificationCommand::RejectCode) => {
                warn!(
                    "Invalid verification code for {}",
                    self.machine
                        .phone_number()
                        .map(PhoneNumber::as_str)
                        .unwrap_or_default()
                );
                let err = FlowError::InvalidCode;
                self.deps.notify(Notice::error(err.to_string()));
                return Err(err);
            }
            _ => return Err(FlowError::NotIssued),
        };

        let lookup = self
            .deps
            .remote(self.deps.directory.find_by_phone_number(&phone_number))
            .await;

        let (user, existing) = match lookup {
            Ok(Some(user)) => (user, true),
            Ok(None) => (UserRecord::new_shell(&phone_number), false),
            Err(e) => {
                error!("User lookup for {} failed: {}", phone_number, e);
                if let Some(VerificationCommand::ReportLookupFailure) =
                    self.machine.decide(&VerificationEvent::LookupFailed)
                {
                    self.deps.notify(Notice::error(LOOKUP_FAILED_MESSAGE));
                }
                return Err(e);
            }
        };

        match self
            .machine
            .decide(&VerificationEvent::UserResolved { user, existing })
        {
            Some(VerificationCommand::CommitSession {
                user,
                existing,
                next,
            }) => {
                if let Err(e) = self.commit(&user) {
                    self.machine = before;
                    error!("Failed to commit session user {}: {}", user.uid, e);
                    self.deps.notify(Notice::error(LOOKUP_FAILED_MESSAGE));
                    return Err(e);
                }
                self.stop_countdown();

                let message = if existing {
                    RETURNING_USER_MESSAGE
                } else {
                    NEW_USER_MESSAGE
                };
                self.deps.notify(Notice::success(message));
                info!(
                    "Verified {} as {} user {}",
                    phone_number,
                    if existing { "returning" } else { "new" },
                    user.uid
                );

                Ok(VerifyOutcome {
                    user,
                    existing,
                    next,
                })
            }
            _ => Err(FlowError::NotIssued),
        }
    }

    /// User went back to login. The stored code stays; only the countdown
    /// and in-memory state go.
    pub fn abandon(&mut self) {
        if let Some(VerificationCommand::Discard) =
            self.machine.decide(&VerificationEvent::Abandoned)
        {
            info!("Verification abandoned");
            self.stop_countdown();
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.machine.phase(),
            phone_number: self.machine.phone_number().cloned(),
            countdown: self.machine.countdown(),
            resend_available: self.machine.resend_available(),
            last_attempt_failed: self.machine.last_attempt_failed(),
        }
    }

    /// The code awaiting verification (shown on screen, as there is no SMS)
    pub fn pending_code(&self) -> Option<&OtpCode> {
        self.machine.current_code()
    }

    pub fn countdown_running(&self) -> bool {
        self.timer.is_some()
    }

    // =========================================================================
    // Effects
    // =========================================================================

    fn deliver(&mut self, phone_number: &PhoneNumber, code: &OtpCode, resent: bool) -> FlowResult<()> {
        let credentials = &self.deps.credentials;
        let previous_phone = credentials
            .get(PHONE_NUMBER_KEY)
            .map_err(FlowError::Storage)?;
        let previous_code = credentials
            .get(PENDING_CODE_KEY)
            .map_err(FlowError::Storage)?;

        // A stored code may only ever sit next to the phone it was issued for:
        // the old code goes first and is put back last.
        credentials
            .remove(PENDING_CODE_KEY)
            .map_err(FlowError::Storage)?;
        let written = credentials
            .set(PHONE_NUMBER_KEY, phone_number.as_str())
            .and_then(|_| credentials.set(PENDING_CODE_KEY, code.as_str()));
        if let Err(e) = written {
            self.restore_pending(previous_phone.as_deref(), previous_code.as_deref());
            return Err(FlowError::Storage(e));
        }

        debug!(code = %code, resent, "Stored pending code for {}", phone_number);
        self.restart_countdown();

        let text = if resent {
            format!("Your new OTP is: {}", code)
        } else {
            format!("Your OTP is: {}", code)
        };
        self.deps.notify(Notice::info(text));
        Ok(())
    }

    /// Put back the pending phone and code after a failed delivery. The code
    /// is only restored once its phone number is.
    fn restore_pending(&self, phone_number: Option<&str>, code: Option<&str>) {
        let credentials = &self.deps.credentials;
        let phone_restored = match phone_number {
            Some(phone_number) => credentials.set(PHONE_NUMBER_KEY, phone_number),
            None => credentials.remove(PHONE_NUMBER_KEY),
        };
        if let Err(e) = phone_restored {
            warn!("Failed to restore pending phone number, dropping its code: {}", e);
            return;
        }

        if let Some(code) = code {
            if let Err(e) = credentials.set(PENDING_CODE_KEY, code) {
                warn!("Failed to restore pending code: {}", e);
            }
        }
    }

    fn commit(&self, user: &UserRecord) -> FlowResult<()> {
        let json = serde_json::to_string(user).map_err(|e| FlowError::Storage(e.into()))?;
        self.deps
            .credentials
            .set(SESSION_USER_KEY, &json)
            .map_err(FlowError::Storage)?;

        // The code is spent once the session user is in place
        if let Err(e) = self.deps.credentials.remove(PENDING_CODE_KEY) {
            warn!("Failed to remove consumed code: {}", e);
        }
        Ok(())
    }

    fn restart_countdown(&mut self) {
        self.generation += 1;
        self.timer = None;
        if self.machine.resend_available() {
            return;
        }
        self.timer = Some(CountdownTimer::start(
            self.generation,
            self.machine.countdown(),
            TICK_PERIOD,
            self.ticks.clone(),
        ));
    }

    fn stop_countdown(&mut self) {
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::NoticeKind;
    use crate::kernel::BaseCredentialStore;
    use crate::kernel::test_dependencies::{DirectoryScript, ScriptedUserDirectory, TestDependencies};
    use tokio::sync::mpsc;

    fn phone() -> PhoneNumber {
        PhoneNumber::parse("9876543210", "+91").unwrap()
    }

    fn session(deps: &TestDependencies) -> (VerificationSession, mpsc::UnboundedReceiver<CountdownTick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (VerificationSession::new(deps.deps(), tx), rx)
    }

    #[tokio::test]
    async fn test_issue_persists_and_announces_code() {
        let deps = TestDependencies::new().with_codes(&[482_913]);
        let (mut session, _rx) = session(&deps);

        let code = session.issue(phone()).unwrap();

        assert_eq!(code.as_str(), "482913");
        assert_eq!(deps.stored(PHONE_NUMBER_KEY).as_deref(), Some("+919876543210"));
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));
        assert_eq!(
            deps.notifier.texts(NoticeKind::Info),
            vec!["Your OTP is: 482913".to_string()]
        );
        assert!(session.countdown_running());
        assert_eq!(session.snapshot().countdown, 60);
    }

    #[tokio::test]
    async fn test_wrong_code_changes_nothing_remote() {
        let deps = TestDependencies::new().with_codes(&[482_913]);
        let (mut session, _rx) = session(&deps);
        session.issue(phone()).unwrap();

        let err = session.verify("000000").await.unwrap_err();

        assert!(matches!(err, FlowError::InvalidCode));
        assert!(deps.directory.calls().is_empty());
        assert_eq!(deps.stored(SESSION_USER_KEY), None);
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));
        assert_eq!(
            deps.notifier.last(),
            Some(Notice::error("Invalid verification code"))
        );
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Issued);
        assert!(snapshot.last_attempt_failed);
    }

    #[tokio::test]
    async fn test_verify_without_issue_is_rejected() {
        let deps = TestDependencies::new();
        let (mut session, _rx) = session(&deps);

        let err = session.verify("482913").await.unwrap_err();

        assert!(matches!(err, FlowError::NotIssued));
        assert!(deps.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_new_user_is_committed_and_sent_to_register() {
        let deps = TestDependencies::new().with_codes(&[482_913]);
        let (mut session, _rx) = session(&deps);
        session.issue(phone()).unwrap();

        let outcome = session.verify("482913").await.unwrap();

        assert!(!outcome.existing);
        assert_eq!(outcome.next, Route::Register);
        assert!(outcome.user.is_new_user);
        assert_eq!(outcome.user.phone_number, "+919876543210");
        let stored: UserRecord =
            serde_json::from_str(&deps.stored(SESSION_USER_KEY).unwrap()).unwrap();
        assert_eq!(stored, outcome.user);
        assert_eq!(deps.stored(PENDING_CODE_KEY), None);
        assert!(!session.countdown_running());
        assert_eq!(
            deps.notifier.last(),
            Some(Notice::success("Verification successful!"))
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_keeps_code_usable() {
        let directory = ScriptedUserDirectory::new().then(DirectoryScript::Fail("unavailable".into()));
        let deps = TestDependencies::new()
            .with_codes(&[482_913])
            .with_directory(directory);
        let (mut session, _rx) = session(&deps);
        session.issue(phone()).unwrap();

        let err = session.verify("482913").await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(session.snapshot().phase, Phase::Issued);
        assert_eq!(deps.stored(SESSION_USER_KEY), None);
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));

        let outcome = session.verify("482913").await.unwrap();
        assert_eq!(outcome.next, Route::Register);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resend_waits_for_cooldown() {
        let deps = TestDependencies::new().with_codes(&[482_913, 731_045]);
        let (mut session, mut rx) = session(&deps);
        session.issue(phone()).unwrap();

        assert_eq!(session.resend().unwrap(), None);
        assert_eq!(deps.issuer.issued(), 1);

        for remaining in (0..60).rev() {
            let tick = rx.recv().await.unwrap();
            session.tick(tick);
            assert_eq!(session.snapshot().countdown, remaining);
        }
        assert!(session.snapshot().resend_available);
        assert!(!session.countdown_running());

        let code = session.resend().unwrap().unwrap();
        assert_eq!(code.as_str(), "731045");
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("731045"));
        assert_eq!(
            deps.notifier.last(),
            Some(Notice::info("Your new OTP is: 731045"))
        );
        assert_eq!(session.snapshot().countdown, 60);
        assert!(session.countdown_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticks_are_ignored() {
        let deps = TestDependencies::new();
        let (mut session, mut rx) = session(&deps);
        session.issue(phone()).unwrap();
        let stale = CountdownTick {
            generation: session.generation,
        };
        for _ in 0..60 {
            let tick = rx.recv().await.unwrap();
            session.tick(tick);
        }
        session.resend().unwrap().unwrap();

        session.tick(stale);

        assert_eq!(session.snapshot().countdown, 60);
    }

    #[tokio::test]
    async fn test_second_issue_on_live_session_is_busy() {
        let deps = TestDependencies::new().with_codes(&[482_913, 222_222]);
        let (mut session, _rx) = session(&deps);
        session.issue(phone()).unwrap();

        let other = PhoneNumber::parse("9123456789", "+91").unwrap();
        let err = session.issue(other).unwrap_err();

        assert!(matches!(err, FlowError::Busy));
        assert_eq!(deps.issuer.issued(), 1);
        assert_eq!(session.snapshot().phone_number, Some(phone()));
        assert_eq!(session.pending_code().unwrap().as_str(), "482913");
        assert_eq!(deps.stored(PHONE_NUMBER_KEY).as_deref(), Some("+919876543210"));
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));
    }

    #[tokio::test]
    async fn test_abandon_keeps_stored_code() {
        let deps = TestDependencies::new().with_codes(&[482_913]);
        let (mut session, _rx) = session(&deps);
        session.issue(phone()).unwrap();

        session.abandon();

        assert_eq!(session.snapshot().phase, Phase::Idle);
        assert!(!session.countdown_running());
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));
    }

    #[tokio::test]
    async fn test_resume_requires_phone_and_code() {
        let deps = TestDependencies::new();
        deps.credentials.set(PHONE_NUMBER_KEY, "+919876543210").unwrap();
        let (tx, _rx) = mpsc::unbounded_channel();

        assert!(VerificationSession::resume(deps.deps(), tx.clone())
            .unwrap()
            .is_none());

        deps.credentials.set(PENDING_CODE_KEY, "482913").unwrap();
        let resumed = VerificationSession::resume(deps.deps(), tx).unwrap().unwrap();

        assert_eq!(resumed.snapshot().phase, Phase::Issued);
        assert_eq!(resumed.snapshot().countdown, 60);
        assert_eq!(resumed.pending_code().unwrap().as_str(), "482913");
        assert!(deps.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_failed_issue_keeps_previous_pending_code() {
        let deps = TestDependencies::new().with_codes(&[482_913, 731_045]);
        let (mut first, _rx) = session(&deps);
        first.issue(phone()).unwrap();
        drop(first);

        deps.credentials.fail_next_set(PENDING_CODE_KEY);
        let (mut second, _rx) = session(&deps);
        let other = PhoneNumber::parse("9123456789", "+91").unwrap();
        let err = second.issue(other).unwrap_err();

        assert!(matches!(err, FlowError::Storage(_)));
        assert_eq!(deps.notifier.last(), Some(Notice::error(ISSUE_FAILED_MESSAGE)));
        assert_eq!(second.snapshot().phase, Phase::Idle);
        assert_eq!(second.snapshot().phone_number, None);
        assert!(!second.countdown_running());
        assert_eq!(deps.stored(PHONE_NUMBER_KEY).as_deref(), Some("+919876543210"));
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));

        // The stored code still only signs in the phone it was issued for
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut resumed = VerificationSession::resume(deps.deps(), tx).unwrap().unwrap();
        let outcome = resumed.verify("482913").await.unwrap();
        assert_eq!(outcome.user.phone_number, "+919876543210");
    }

    #[tokio::test]
    async fn test_failed_issue_on_empty_store_leaves_nothing() {
        let deps = TestDependencies::new();
        deps.credentials.fail_sets(PHONE_NUMBER_KEY);
        let (mut session, _rx) = session(&deps);

        let err = session.issue(phone()).unwrap_err();

        assert!(matches!(err, FlowError::Storage(_)));
        assert_eq!(deps.stored(PHONE_NUMBER_KEY), None);
        assert_eq!(deps.stored(PENDING_CODE_KEY), None);
        assert_eq!(deps.notifier.notices(), vec![Notice::error(ISSUE_FAILED_MESSAGE)]);
        assert!(session.issue(phone()).is_err());

        deps.credentials.heal();
        assert!(session.issue(phone()).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_resend_keeps_old_code() {
        let deps = TestDependencies::new().with_codes(&[482_913, 731_045]);
        let (mut session, mut rx) = session(&deps);
        session.issue(phone()).unwrap();
        for _ in 0..60 {
            let tick = rx.recv().await.unwrap();
            session.tick(tick);
        }

        deps.credentials.fail_next_set(PENDING_CODE_KEY);
        let err = session.resend().unwrap_err();

        assert!(matches!(err, FlowError::Storage(_)));
        assert_eq!(deps.notifier.last(), Some(Notice::error(RESEND_FAILED_MESSAGE)));
        assert_eq!(session.pending_code().unwrap().as_str(), "482913");
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, Phase::Issued);
        assert!(snapshot.resend_available);
        assert_eq!(snapshot.countdown, 0);
        assert!(!session.countdown_running());

        assert!(session.resend().unwrap().is_some());
        assert!(session.countdown_running());
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_session_issued() {
        let deps = TestDependencies::new().with_codes(&[482_913]);
        let (mut session, _rx) = session(&deps);
        session.issue(phone()).unwrap();
        deps.credentials.fail_sets(SESSION_USER_KEY);

        let err = session.verify("482913").await.unwrap_err();

        assert!(matches!(err, FlowError::Storage(_)));
        assert_eq!(deps.notifier.last(), Some(Notice::error(LOOKUP_FAILED_MESSAGE)));
        assert_eq!(session.snapshot().phase, Phase::Issued);
        assert_eq!(session.pending_code().unwrap().as_str(), "482913");
        assert!(session.countdown_running());
        assert_eq!(deps.stored(SESSION_USER_KEY), None);
        assert_eq!(deps.stored(PENDING_CODE_KEY).as_deref(), Some("482913"));

        deps.credentials.heal();
        let outcome = session.verify("482913").await.unwrap();
        assert_eq!(outcome.next, Route::Register);
    }
}
