//! Durable key-value storage for client-local state
//!
//! The session store never talks to a storage medium directly; it goes
//! through the [`KeyValueStore`] port so the medium can be a JSON file in
//! the user data directory, the OS keyring, or an in-memory map.

use crate::config::{SessionBackend, SessionConfig};
use crate::error::Result;
use async_trait::async_trait;

pub mod file;
pub mod memory;
pub mod os_keyring;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::os_keyring::KeyringStore;

/// Text key-value store that survives process restarts
///
/// Values are opaque strings; callers own their serialization. A missing
/// key is `Ok(None)`, never an error, and removing a missing key is a
/// no-op.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value under `key`
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Build the store selected by the session configuration
///
/// # Errors
///
/// Returns error if the file backend has no explicit path and the platform
/// data directory cannot be determined
pub fn open_store(config: &SessionConfig) -> Result<Box<dyn KeyValueStore>> {
    let store: Box<dyn KeyValueStore> = match config.backend {
        SessionBackend::File => {
            let path = match &config.path {
                Some(path) => path.clone(),
                None => FileStore::default_path()?,
            };
            tracing::debug!("Using file session storage at {}", path.display());
            Box::new(FileStore::new(path))
        }
        SessionBackend::Keyring => {
            tracing::debug!("Using OS keyring session storage");
            Box::new(KeyringStore::new())
        }
        SessionBackend::Memory => {
            tracing::debug!("Using in-memory session storage");
            Box::new(MemoryStore::new())
        }
    };
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_store_file_backend_uses_configured_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let config = SessionConfig {
            backend: SessionBackend::File,
            path: Some(path.clone()),
            key: "user".to_string(),
        };

        let store = open_store(&config).unwrap();
        store.set("user", "value").await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_open_store_memory_backend_starts_empty() {
        let config = SessionConfig {
            backend: SessionBackend::Memory,
            ..SessionConfig::default()
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.get("user").await.unwrap(), None);
    }
}
