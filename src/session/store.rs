//! Session store: the single owner of authentication state
//!
//! Every read and write of the durable session record goes through
//! [`SessionStore`]. Storage failures never escape it: an unreadable or
//! malformed record restores as "anonymous", and a failed write still
//! leaves the in-memory session set for the current run.

use super::Session;
use crate::storage::KeyValueStore;

/// Owner of the in-memory [`Session`] and its durable record
pub struct SessionStore {
    storage: Box<dyn KeyValueStore>,
    key: String,
    session: Option<Session>,
    restored: bool,
}

impl SessionStore {
    /// Create a store over `storage`, persisting the record under `key`
    ///
    /// The store starts anonymous and not yet restored; call
    /// [`SessionStore::restore`] once at startup.
    pub fn new(storage: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            session: None,
            restored: false,
        }
    }

    /// Load the durable record into memory
    ///
    /// Any failure (storage unreadable, record not JSON, missing fields,
    /// blank username) leaves the session absent and is only logged.
    /// Always marks the store as restored.
    pub async fn restore(&mut self) {
        self.session = match self.storage.get(&self.key).await {
            Ok(Some(record)) => match Session::from_record(&record) {
                Ok(session) => {
                    tracing::info!(
                        username = %session.username(),
                        role = %session.role(),
                        "Restored session"
                    );
                    Some(session)
                }
                Err(e) => {
                    tracing::warn!("Ignoring malformed session record: {}", e);
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("No stored session, starting anonymous");
                None
            }
            Err(e) => {
                tracing::warn!("Failed to read session record, starting anonymous: {}", e);
                None
            }
        };
        self.restored = true;
    }

    /// Commit `session` as the current operator
    ///
    /// The in-memory session is set first; persisting it is best-effort.
    pub async fn login(&mut self, session: Session) {
        tracing::info!(
            username = %session.username(),
            role = %session.role(),
            "Logging in"
        );

        match session.to_record() {
            Ok(record) => {
                if let Err(e) = self.storage.set(&self.key, &record).await {
                    tracing::warn!(
                        "Failed to persist session, it will not survive a restart: {}",
                        e
                    );
                }
            }
            Err(e) => tracing::warn!("Failed to serialize session: {}", e),
        }

        self.session = Some(session);
    }

    /// Clear the session and remove its durable record
    ///
    /// Idempotent: logging out while anonymous is a no-op.
    pub async fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!(username = %session.username(), "Logging out");
        }

        if let Err(e) = self.storage.remove(&self.key).await {
            tracing::warn!("Failed to remove session record: {}", e);
        }
    }

    /// Current session, if any
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// True iff a session is present and its role is `admin`
    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    /// Whether [`SessionStore::restore`] has completed
    pub fn is_restored(&self) -> bool {
        self.restored
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("key", &self.key)
            .field("session", &self.session)
            .field("restored", &self.restored)
            .finish_non_exhaustive()
    }
}
