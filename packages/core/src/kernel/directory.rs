use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::debug;

use super::BaseUserDirectory;
use crate::domains::auth::models::{PhoneNumber, UserRecord};

/// User directory held in process memory.
///
/// Used when no remote project is configured, and as the default directory
/// in tests.
#[derive(Default)]
pub struct MemoryUserDirectory {
    records: Mutex<BTreeMap<String, UserRecord>>,
}

impl MemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record keyed by its uid
    pub fn with_record(self, record: UserRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .insert(record.uid.clone(), record);
        self
    }

    pub fn get(&self, uid: &str) -> Option<UserRecord> {
        self.records.lock().unwrap().get(uid).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BaseUserDirectory for MemoryUserDirectory {
    async fn find_by_phone_number(&self, phone_number: &PhoneNumber) -> Result<Option<UserRecord>> {
        let found = self
            .records
            .lock()
            .unwrap()
            .values()
            .find(|r| r.phone_number == phone_number.as_str())
            .cloned();
        debug!(
            "Directory lookup for {}: {}",
            phone_number,
            if found.is_some() { "found" } else { "not found" }
        );
        Ok(found)
    }

    async fn write(&self, uid: &str, record: &UserRecord) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(uid.to_string(), record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_by_phone_number() {
        let phone = PhoneNumber::parse("9876543210", "+91").unwrap();
        let other = PhoneNumber::parse("9123456789", "+91").unwrap();
        let directory = MemoryUserDirectory::new().with_record(UserRecord::new_shell(&phone));

        assert!(directory.find_by_phone_number(&phone).await.unwrap().is_some());
        assert!(directory.find_by_phone_number(&other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_replaces_by_uid() {
        let phone = PhoneNumber::parse("9876543210", "+91").unwrap();
        let mut record = UserRecord::new_shell(&phone);
        let directory = MemoryUserDirectory::new();

        directory.write(&record.uid, &record).await.unwrap();
        record.first_name = Some("Amy".to_string());
        directory.write(&record.uid, &record).await.unwrap();

        assert_eq!(directory.len(), 1);
        assert_eq!(
            directory.get(&record.uid).unwrap().first_name.as_deref(),
            Some("Amy")
        );
    }
}
