//! Services: local persistence (credentials, preferences) and the partner API.

pub mod api;
pub mod credentials;
pub mod preferences;
pub mod storage;

pub use api::ApiClient;
pub use credentials::{ApiCredentials, CredentialStore};
pub use preferences::{Preferences, Theme};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
