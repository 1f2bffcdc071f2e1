//! In-memory key-value store
//!
//! Clones share the same map, so a test can hand one clone to a session
//! store, drop it, and build a fresh session store over another clone to
//! simulate a process restart.

use super::KeyValueStore;
use crate::error::{Result, ReliefError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Process-local [`KeyValueStore`]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .entries
            .read()
            .map_err(|_| ReliefError::Storage("Failed to acquire read lock".to_string()))?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| ReliefError::Storage("Failed to acquire write lock".to_string()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| ReliefError::Storage("Failed to acquire write lock".to_string()))?;
        map.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("user", "{}").await.unwrap();
        assert_eq!(store.get("user").await.unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len(), 1);

        store.remove("user").await.unwrap();
        assert_eq!(store.get("user").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.remove("user").await.unwrap();
        store.remove("user").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("user", "a").await.unwrap();
        assert_eq!(other.get("user").await.unwrap().as_deref(), Some("a"));
    }
}
