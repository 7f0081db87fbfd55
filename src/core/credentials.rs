//! Credential storage for service API keys

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::errors::{Result, TranslationError};

/// Key/value store for credentials; an empty string means "not configured"
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get_credential(&self, name: &str) -> String;

    /// Store a credential. Temporary values are kept for this session only.
    async fn set_credential(&self, name: &str, value: &str, temporary: bool) -> Result<()>;

    async fn is_credential_stored_temporarily(&self, name: &str) -> bool;
}

#[derive(Debug, Clone)]
struct StoredCredential {
    value: String,
    temporary: bool,
}

/// Credentials in memory, optionally persisted to a JSON file.
///
/// Environment variables take precedence: `yandex.api.key` is overridden by
/// `YANDEX_API_KEY` when set and non-empty. Temporary credentials are never
/// written to the file.
#[derive(Clone)]
pub struct PreferenceCredentials {
    values: Arc<RwLock<HashMap<String, StoredCredential>>>,
    path: Option<PathBuf>,
    env_lookup: fn(&str) -> Option<String>,
}

impl fmt::Debug for PreferenceCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceCredentials")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Default for PreferenceCredentials {
    fn default() -> Self {
        Self {
            values: Arc::default(),
            path: None,
            env_lookup: process_env,
        }
    }
}

fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

impl PreferenceCredentials {
    /// Memory-only store
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the environment lookup used for overrides
    pub fn with_env_lookup(mut self, lookup: fn(&str) -> Option<String>) -> Self {
        self.env_lookup = lookup;
        self
    }

    /// Store backed by `path`; a missing file starts empty
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mut values = HashMap::new();

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let saved: BTreeMap<String, String> = serde_json::from_str(&content)?;
            for (name, value) in saved {
                values.insert(
                    name,
                    StoredCredential {
                        value,
                        temporary: false,
                    },
                );
            }
            info!("Loaded {} credentials from {}", values.len(), path.display());
        }

        Ok(Self {
            values: Arc::new(RwLock::new(values)),
            path: Some(path),
            env_lookup: process_env,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self, values: &HashMap<String, StoredCredential>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let saved: BTreeMap<&str, &str> = values
            .iter()
            .filter(|(_, c)| !c.temporary)
            .map(|(name, c)| (name.as_str(), c.value.as_str()))
            .collect();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(&saved)?;
        std::fs::write(path, content).map_err(|e| TranslationError::CredentialError {
            name: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!("Saved {} credentials", saved.len());
        Ok(())
    }
}

/// Environment variable overriding credential `name`
pub fn env_var_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
        .collect()
}

#[async_trait]
impl CredentialStore for PreferenceCredentials {
    async fn get_credential(&self, name: &str) -> String {
        if let Some(value) = (self.env_lookup)(&env_var_name(name)) {
            if !value.is_empty() {
                return value;
            }
        }

        let values = self.values.read().await;
        values.get(name).map(|c| c.value.clone()).unwrap_or_default()
    }

    async fn set_credential(&self, name: &str, value: &str, temporary: bool) -> Result<()> {
        let mut values = self.values.write().await;
        values.insert(
            name.to_string(),
            StoredCredential {
                value: value.to_string(),
                temporary,
            },
        );
        info!("Credential {} updated (temporary: {})", name, temporary);
        self.persist(&values)
    }

    async fn is_credential_stored_temporarily(&self, name: &str) -> bool {
        let values = self.values.read().await;
        values.get(name).map(|c| c.temporary).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("yandex.api.key"), "YANDEX_API_KEY");
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = PreferenceCredentials::new().with_env_lookup(|_| None);
        assert_eq!(store.get_credential("test.memory.key").await, "");

        store.set_credential("test.memory.key", "abc", true).await.unwrap();
        assert_eq!(store.get_credential("test.memory.key").await, "abc");
        assert!(store.is_credential_stored_temporarily("test.memory.key").await);
    }

    #[tokio::test]
    async fn test_file_store_skips_temporary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = PreferenceCredentials::open(&path).unwrap();
        store.set_credential("test.file.kept", "persist-me", false).await.unwrap();
        store.set_credential("test.file.temp", "forget-me", true).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("persist-me"));
        assert!(!content.contains("forget-me"));

        let reopened = PreferenceCredentials::open(&path).unwrap();
        assert_eq!(reopened.get_credential("test.file.kept").await, "persist-me");
        assert_eq!(reopened.get_credential("test.file.temp").await, "");
        assert!(!reopened.is_credential_stored_temporarily("test.file.kept").await);
    }

    #[tokio::test]
    async fn test_temporary_replaces_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = PreferenceCredentials::open(&path).unwrap();
        store.set_credential("test.switch.key", "first", false).await.unwrap();
        store.set_credential("test.switch.key", "second", true).await.unwrap();

        let reopened = PreferenceCredentials::open(&path).unwrap();
        assert_eq!(reopened.get_credential("test.switch.key").await, "");
    }

    #[tokio::test]
    async fn test_env_overrides_store() {
        let store = PreferenceCredentials::new().with_env_lookup(|name| {
            (name == "TEST_ENV_OVERRIDE_KEY").then(|| "from-env".to_string())
        });
        store.set_credential("test.env.override.key", "stored", false).await.unwrap();
        store.set_credential("test.env.other.key", "stored", false).await.unwrap();

        assert_eq!(store.get_credential("test.env.override.key").await, "from-env");
        assert_eq!(store.get_credential("test.env.other.key").await, "stored");
    }

    #[tokio::test]
    async fn test_empty_env_value_is_ignored() {
        let store = PreferenceCredentials::new().with_env_lookup(|_| Some(String::new()));
        store.set_credential("test.env.empty.key", "stored", false).await.unwrap();

        assert_eq!(store.get_credential("test.env.empty.key").await, "stored");
    }
}
