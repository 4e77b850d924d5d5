use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CREDENTIALS_PATH: &str = ".travelwise/credentials.json";
pub const DEFAULT_COUNTRY_PREFIX: &str = "+91";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 5;

/// Firestore project access for the remote user directory
#[derive(Debug, Clone)]
pub struct FirestoreConfig {
    pub project_id: String,
    pub api_key: String,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub credentials_path: PathBuf,
    pub country_prefix: String,
    pub remote_timeout: Duration,
    /// `None` runs against an in-process directory
    pub firestore: Option<FirestoreConfig>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let remote_timeout_secs = match env::var("TRAVELWISE_REMOTE_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .context("TRAVELWISE_REMOTE_TIMEOUT_SECS must be a whole number of seconds")?,
            Err(_) => DEFAULT_REMOTE_TIMEOUT_SECS,
        };

        let firestore = match (
            env::var("FIRESTORE_PROJECT_ID").ok(),
            env::var("FIRESTORE_API_KEY").ok(),
        ) {
            (Some(project_id), Some(api_key)) => Some(FirestoreConfig {
                project_id,
                api_key,
            }),
            (None, None) => None,
            _ => anyhow::bail!("FIRESTORE_PROJECT_ID and FIRESTORE_API_KEY must be set together"),
        };

        Ok(Self {
            credentials_path: env::var("TRAVELWISE_CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH)),
            country_prefix: env::var("TRAVELWISE_COUNTRY_PREFIX")
                .unwrap_or_else(|_| DEFAULT_COUNTRY_PREFIX.to_string()),
            remote_timeout: Duration::from_secs(remote_timeout_secs),
            firestore,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_PATH),
            country_prefix: DEFAULT_COUNTRY_PREFIX.to_string(),
            remote_timeout: Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS),
            firestore: None,
        }
    }
}
