//! File-backed key-value store
//!
//! All keys live in one JSON object on disk. Writes go to a sibling
//! temporary file that is then renamed over the original, so a crash
//! mid-write leaves either the old or the new map, never a torn file.

use super::KeyValueStore;
use crate::error::{Result, ReliefError};
use anyhow::Context;
use async_trait::async_trait;
use directories::ProjectDirs;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// [`KeyValueStore`] persisted as a JSON object in a single file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`
    ///
    /// The file and its parent directories are created lazily on the
    /// first write.
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefdesk::storage::FileStore;
    ///
    /// let store = FileStore::new("/tmp/reliefdesk-session.json");
    /// assert!(store.path().ends_with("reliefdesk-session.json"));
    /// ```
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Location of the default session file in the user data directory
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Storage`] when the platform has no home
    /// directory to derive the data directory from
    pub fn default_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "reliefdesk", "reliefdesk")
            .ok_or_else(|| ReliefError::Storage("Could not determine data directory".into()))?;
        Ok(proj_dirs.data_dir().join("session.json"))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(ReliefError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                ))
                .into())
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let map = serde_json::from_str(&contents).map_err(|e| {
            ReliefError::Storage(format!(
                "Corrupted storage file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(map)
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .context("Failed to create storage directory")
                    .map_err(|e| ReliefError::Storage(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(map)?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .context("Failed to write storage file")
            .map_err(|e| ReliefError::Storage(e.to_string()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .context("Failed to replace storage file")
            .map_err(|e| ReliefError::Storage(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        // a corrupted file is replaced rather than blocking every future write
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Discarding unreadable storage file: {}", e);
                BTreeMap::new()
            }
        };
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut map = match self.read_map().await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!("Discarding unreadable storage file: {}", e);
                BTreeMap::new()
            }
        };

        if map.remove(key).is_none() && tokio::fs::metadata(&self.path).await.is_err() {
            return Ok(());
        }

        if map.is_empty() {
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(ReliefError::Storage(format!(
                    "Failed to remove {}: {}",
                    self.path.display(),
                    e
                ))
                .into()),
            }
        } else {
            self.write_map(&map).await
        }
    }
}
