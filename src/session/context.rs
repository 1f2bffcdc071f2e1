//! Auth context: the session handle shared with the rest of the client
//!
//! Built once at startup and passed by reference to the route guard, the
//! navigation shell and the login view. Consumers must check
//! [`AuthContext::is_ready`] before acting on the session: until
//! [`AuthContext::restore`] completes, "no session" only means "not
//! loaded yet".

use super::{Session, SessionStore};
use crate::config::SessionConfig;
use crate::error::Result;
use crate::storage;

/// Read access to the session plus the login/logout mutators
#[derive(Debug)]
pub struct AuthContext {
    store: SessionStore,
}

impl AuthContext {
    /// Wrap an explicitly constructed session store
    pub fn new(store: SessionStore) -> Self {
        Self { store }
    }

    /// Build the store selected by `config` and restore it
    ///
    /// # Errors
    ///
    /// Returns error only when the storage backend itself cannot be
    /// constructed; restoring never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefdesk::config::{SessionBackend, SessionConfig};
    /// use reliefdesk::session::AuthContext;
    ///
    /// # async fn example() -> reliefdesk::error::Result<()> {
    /// let config = SessionConfig {
    ///     backend: SessionBackend::Memory,
    ///     ..SessionConfig::default()
    /// };
    /// let auth = AuthContext::bootstrap(&config).await?;
    /// assert!(auth.is_ready());
    /// assert!(auth.session().is_none());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn bootstrap(config: &SessionConfig) -> Result<Self> {
        let backend = storage::open_store(config)?;
        let mut context = Self::new(SessionStore::new(backend, config.key.clone()));
        context.restore().await;
        Ok(context)
    }

    /// Restore the session from durable storage and become ready
    pub async fn restore(&mut self) {
        self.store.restore().await;
    }

    /// Whether the initial restore has completed
    pub fn is_ready(&self) -> bool {
        self.store.is_restored()
    }

    /// Current session, if any
    pub fn session(&self) -> Option<&Session> {
        self.store.session()
    }

    /// Whether the current session carries the admin role
    pub fn is_admin(&self) -> bool {
        self.store.is_admin()
    }

    /// Commit a session that the caller has already validated
    pub async fn login(&mut self, session: Session) {
        self.store.login(session).await;
    }

    /// Drop the current session
    pub async fn logout(&mut self) {
        self.store.logout().await;
    }
}
