// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into AuthDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{
    AuthDeps, BaseCredentialStore, BaseNotifier, BaseOtpIssuer, BaseUserDirectory,
    MemoryCredentialStore, MemoryUserDirectory,
};
use crate::common::{Notice, NoticeKind};
use crate::domains::auth::models::{OtpCode, PhoneNumber, UserRecord};

// =============================================================================
// Spy Notifier
// =============================================================================

/// Records every notice
#[derive(Default)]
pub struct SpyNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl SpyNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().unwrap().last().cloned()
    }

    /// Texts of notices of one kind, in order
    pub fn texts(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .map(|n| n.text.clone())
            .collect()
    }
}

impl BaseNotifier for SpyNotifier {
    fn emit(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

// =============================================================================
// Fixed OTP Issuer
// =============================================================================

/// Hands out queued codes in order, then falls back to `100000`
pub struct FixedOtpIssuer {
    codes: Mutex<VecDeque<OtpCode>>,
    issued: Mutex<usize>,
}

impl FixedOtpIssuer {
    /// Panics on codes outside `[100000, 999999]`
    pub fn new(codes: &[u32]) -> Self {
        Self {
            codes: Mutex::new(
                codes
                    .iter()
                    .map(|c| OtpCode::from_number(*c).expect("test code out of range"))
                    .collect(),
            ),
            issued: Mutex::new(0),
        }
    }

    /// How many codes were handed out
    pub fn issued(&self) -> usize {
        *self.issued.lock().unwrap()
    }
}

impl BaseOtpIssuer for FixedOtpIssuer {
    fn issue(&self) -> OtpCode {
        *self.issued.lock().unwrap() += 1;
        self.codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| OtpCode::from_number(100_000).unwrap())
    }
}

// =============================================================================
// Scripted User Directory
// =============================================================================

/// What the next directory call should do
#[derive(Debug, Clone)]
pub enum DirectoryScript {
    /// Fail with the given message
    Fail(String),
    /// Never answer within any reasonable timeout
    Hang,
}

/// Arguments captured from a directory call
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryCall {
    Find(String),
    Write { uid: String, record: UserRecord },
}

/// Memory directory whose calls can be scripted to fail or stall
pub struct ScriptedUserDirectory {
    inner: MemoryUserDirectory,
    script: Mutex<VecDeque<DirectoryScript>>,
    calls: Mutex<Vec<DirectoryCall>>,
}

impl ScriptedUserDirectory {
    pub fn new() -> Self {
        Self {
            inner: MemoryUserDirectory::new(),
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_record(mut self, record: UserRecord) -> Self {
        self.inner = self.inner.with_record(record);
        self
    }

    /// Queue a behaviour for the next call
    pub fn then(self, step: DirectoryScript) -> Self {
        self.script.lock().unwrap().push_back(step);
        self
    }

    pub fn calls(&self) -> Vec<DirectoryCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<(String, UserRecord)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                DirectoryCall::Write { uid, record } => Some((uid, record)),
                DirectoryCall::Find(_) => None,
            })
            .collect()
    }

    pub fn get(&self, uid: &str) -> Option<UserRecord> {
        self.inner.get(uid)
    }

    async fn scripted(&self) -> Result<()> {
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(DirectoryScript::Fail(message)) => Err(anyhow::anyhow!(message)),
            Some(DirectoryScript::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(anyhow::anyhow!("directory hung"))
            }
            None => Ok(()),
        }
    }
}

impl Default for ScriptedUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseUserDirectory for ScriptedUserDirectory {
    async fn find_by_phone_number(&self, phone_number: &PhoneNumber) -> Result<Option<UserRecord>> {
        self.calls
            .lock()
            .unwrap()
            .push(DirectoryCall::Find(phone_number.to_string()));
        self.scripted().await?;
        self.inner.find_by_phone_number(phone_number).await
    }

    async fn write(&self, uid: &str, record: &UserRecord) -> Result<()> {
        self.calls.lock().unwrap().push(DirectoryCall::Write {
            uid: uid.to_string(),
            record: record.clone(),
        });
        self.scripted().await?;
        self.inner.write(uid, record).await
    }
}

// =============================================================================
// Scripted Credential Store
// =============================================================================

/// How often `set` on a key should fail
#[derive(Debug, Clone, Copy)]
enum WriteFailure {
    Times(usize),
    Always,
}

/// Memory store whose writes can be made to fail per key. Reads and removes
/// always succeed.
#[derive(Default)]
pub struct ScriptedCredentialStore {
    inner: MemoryCredentialStore,
    failures: Mutex<HashMap<String, WriteFailure>>,
}

impl ScriptedCredentialStore {
    pub fn new(inner: MemoryCredentialStore) -> Self {
        Self {
            inner,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Fail the next `set` of `key` only
    pub fn fail_next_set(&self, key: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(key.to_string(), WriteFailure::Times(1));
    }

    /// Fail every `set` of `key` until healed
    pub fn fail_sets(&self, key: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(key.to_string(), WriteFailure::Always);
    }

    pub fn heal(&self) {
        self.failures.lock().unwrap().clear();
    }

    fn should_fail(&self, key: &str) -> bool {
        let mut failures = self.failures.lock().unwrap();
        match failures.get(key).copied() {
            Some(WriteFailure::Always) => true,
            Some(WriteFailure::Times(n)) if n > 1 => {
                failures.insert(key.to_string(), WriteFailure::Times(n - 1));
                true
            }
            Some(WriteFailure::Times(_)) => {
                failures.remove(key);
                true
            }
            None => false,
        }
    }
}

impl BaseCredentialStore for ScriptedCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.should_fail(key) {
            anyhow::bail!("disk full");
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Mocks wired into an `AuthDeps`, with handles kept for assertions
pub struct TestDependencies {
    pub credentials: Arc<ScriptedCredentialStore>,
    pub directory: Arc<ScriptedUserDirectory>,
    pub notifier: Arc<SpyNotifier>,
    pub issuer: Arc<FixedOtpIssuer>,
    pub remote_timeout: Duration,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            credentials: Arc::new(ScriptedCredentialStore::default()),
            directory: Arc::new(ScriptedUserDirectory::new()),
            notifier: Arc::new(SpyNotifier::new()),
            issuer: Arc::new(FixedOtpIssuer::new(&[])),
            remote_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_codes(mut self, codes: &[u32]) -> Self {
        self.issuer = Arc::new(FixedOtpIssuer::new(codes));
        self
    }

    pub fn with_directory(mut self, directory: ScriptedUserDirectory) -> Self {
        self.directory = Arc::new(directory);
        self
    }

    pub fn with_credentials(mut self, credentials: MemoryCredentialStore) -> Self {
        self.credentials = Arc::new(ScriptedCredentialStore::new(credentials));
        self
    }

    pub fn with_remote_timeout(mut self, remote_timeout: Duration) -> Self {
        self.remote_timeout = remote_timeout;
        self
    }

    pub fn deps(&self) -> AuthDeps {
        AuthDeps::new(
            self.credentials.clone() as Arc<dyn BaseCredentialStore>,
            self.directory.clone() as Arc<dyn BaseUserDirectory>,
            self.notifier.clone() as Arc<dyn BaseNotifier>,
            self.issuer.clone() as Arc<dyn BaseOtpIssuer>,
        )
        .with_remote_timeout(self.remote_timeout)
    }

    /// Raw value under a credential key
    pub fn stored(&self, key: &str) -> Option<String> {
        self.credentials.get(key).unwrap()
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
