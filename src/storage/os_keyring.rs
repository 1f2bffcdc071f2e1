//! Key-value storage via the OS keyring
//!
//! Each key becomes one credential entry under the `reliefdesk` service
//! (Keychain on macOS, Secret Service on Linux, Windows Credential
//! Manager on Windows). The keyring itself is stateless, so
//! [`KeyringStore`] only carries the service name.

use super::KeyValueStore;
use crate::error::{Result, ReliefError};
use async_trait::async_trait;

/// [`KeyValueStore`] backed by the OS native credential store
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    /// Store using the default `reliefdesk` service name
    pub fn new() -> Self {
        Self::with_service("reliefdesk")
    }

    /// Store using a custom service name (useful to isolate test entries)
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Service name entries are filed under
    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        Ok(keyring::Entry::new(&self.service, key).map_err(ReliefError::Keyring)?)
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for KeyringStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(ReliefError::Keyring(e).into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(ReliefError::Keyring)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(ReliefError::Keyring(e).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_service_name() {
        assert_eq!(KeyringStore::new().service(), "reliefdesk");
        assert_eq!(KeyringStore::default().service(), "reliefdesk");
    }

    #[test]
    fn test_custom_service_name() {
        let store = KeyringStore::with_service("reliefdesk-test");
        assert_eq!(store.service(), "reliefdesk-test");
    }

    #[tokio::test]
    #[ignore = "requires system keyring"]
    async fn test_keyring_roundtrip() {
        let store = KeyringStore::with_service("reliefdesk-integration-test");
        store.set("user", r#"{"username":"admin","role":"admin"}"#).await.expect("set");
        let loaded = store.get("user").await.expect("get");
        assert!(loaded.is_some());

        store.remove("user").await.expect("remove");
        store.remove("user").await.expect("second remove is a no-op");
        assert!(store.get("user").await.expect("get after remove").is_none());
    }
}
