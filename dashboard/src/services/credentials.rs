//! # Credential Store
//!
//! Holds the API key/secret pair attached to every outbound request.
//!
//! - Writes go to memory first, then to the persistent [`KeyValueStore`] under
//!   [`CREDENTIALS_KEY`]. A persistence failure is logged and swallowed: the pair
//!   stays usable for the rest of the session.
//! - Reads hand out cloned snapshots taken under a lock, so a request dispatched
//!   before a rotation keeps the pair it started with and never sees half of each.
//! - A pair with an empty field is stored as given but never sent.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::storage::{KeyValueStore, MemoryStore};

/// Persistent key for the credential pair.
pub const CREDENTIALS_KEY: &str = "partner-dashboard.api-credentials";

/// API key/secret pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Both fields non-empty.
    pub fn is_complete(&self) -> bool {
        !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

// Never print the secret.
impl fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &shared::redact(&self.api_key))
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Process-wide credential holder, owned by the composition root.
pub struct CredentialStore {
    current: RwLock<Option<ApiCredentials>>,
    backend: Arc<dyn KeyValueStore>,
}

impl CredentialStore {
    /// Create a store over `backend`, loading any persisted pair.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        let persisted = match backend.get(CREDENTIALS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<ApiCredentials>(&raw) {
                Ok(creds) => {
                    debug!(api_key = %shared::redact(&creds.api_key), "Loaded persisted API credentials");
                    Some(creds)
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring unreadable persisted API credentials");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Credential storage unavailable, starting without credentials");
                None
            }
        };

        Self {
            current: RwLock::new(persisted),
            backend,
        }
    }

    /// Store with no durable backing.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Store the pair in memory and, if possible, persistently.
    pub fn set_api_credentials(&self, api_key: impl Into<String>, api_secret: impl Into<String>) {
        let creds = ApiCredentials::new(api_key, api_secret);

        match serde_json::to_string(&creds) {
            Ok(raw) => {
                if let Err(e) = self.backend.set(CREDENTIALS_KEY, &raw) {
                    warn!(error = %e, "Failed to persist API credentials, keeping them in memory only");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode API credentials"),
        }

        info!(api_key = %shared::redact(&creds.api_key), complete = creds.is_complete(), "API credentials set");
        *self.current.write() = Some(creds);
    }

    /// Remove the pair from memory and persistent storage. Idempotent.
    pub fn clear_api_credentials(&self) {
        let had = self.current.write().take().is_some();

        if let Err(e) = self.backend.remove(CREDENTIALS_KEY) {
            warn!(error = %e, "Failed to remove persisted API credentials");
        }

        if had {
            info!("API credentials cleared");
        }
    }

    /// True iff both key and secret are present and non-empty.
    pub fn has_api_credentials(&self) -> bool {
        self.current
            .read()
            .as_ref()
            .is_some_and(ApiCredentials::is_complete)
    }

    /// The pair as last set, or `None`.
    pub fn get_api_credentials(&self) -> Option<ApiCredentials> {
        self.current.read().clone()
    }

    /// The pair to attach to a request being dispatched now; `None` unless complete.
    pub fn snapshot(&self) -> Option<ApiCredentials> {
        self.current
            .read()
            .as_ref()
            .filter(|creds| creds.is_complete())
            .cloned()
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("current", &*self.current.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::storage::{FileStore, StorageError};

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Corrupt {
                path: "broken".into(),
                reason: "unavailable".into(),
            })
        }
        fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
            self.get(key).map(|_| ())
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.get(key).map(|_| ())
        }
    }

    #[test]
    fn test_set_then_get_roundtrips_exactly() {
        let store = CredentialStore::in_memory();
        store.set_api_credentials("key-1", "secret-1");
        assert_eq!(
            store.get_api_credentials(),
            Some(ApiCredentials::new("key-1", "secret-1"))
        );
        assert!(store.has_api_credentials());
    }

    #[test]
    fn test_partial_credentials_are_not_usable() {
        let store = CredentialStore::in_memory();
        store.set_api_credentials("key-1", "");
        assert!(!store.has_api_credentials());
        assert!(store.snapshot().is_none());
        assert!(store.get_api_credentials().is_some());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = CredentialStore::in_memory();
        store.set_api_credentials("k", "s");
        store.clear_api_credentials();
        assert!(!store.has_api_credentials());
        assert_eq!(store.get_api_credentials(), None);

        store.clear_api_credentials();
        assert!(!store.has_api_credentials());
        assert_eq!(store.get_api_credentials(), None);
    }

    #[test]
    fn test_storage_failure_falls_back_to_memory() {
        let store = CredentialStore::new(Arc::new(BrokenStore));
        store.set_api_credentials("k", "s");
        assert!(store.has_api_credentials());
        store.clear_api_credentials();
        assert!(!store.has_api_credentials());
    }

    #[test]
    fn test_credentials_survive_restart_with_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let first = CredentialStore::new(Arc::new(FileStore::new(&path)));
        first.set_api_credentials("persisted-key", "persisted-secret");

        let second = CredentialStore::new(Arc::new(FileStore::new(&path)));
        assert_eq!(
            second.get_api_credentials(),
            Some(ApiCredentials::new("persisted-key", "persisted-secret"))
        );

        second.clear_api_credentials();
        let third = CredentialStore::new(Arc::new(FileStore::new(&path)));
        assert!(!third.has_api_credentials());
    }

    #[test]
    fn test_debug_output_hides_secret() {
        let creds = ApiCredentials::new("0123456789abcdef", "super-secret-value");
        let printed = format!("{creds:?}");
        assert!(!printed.contains("super-secret-value"));
        assert!(!printed.contains("0123456789abcdef"));
    }
}
