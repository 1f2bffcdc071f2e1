//! Credential checks performed by the login view
//!
//! The login view only needs "do these credentials map to a session?".
//! [`StaticCredentialValidator`] answers that against the configured admin
//! pair; any other mechanism can be swapped in behind the trait.

use super::{Role, Session};
use crate::config::AuthConfig;
use crate::error::{Result, ReliefError};
use std::fmt;

/// Username/password pair submitted through the login view
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Submitted username
    pub username: String,
    /// Submitted password
    pub password: String,
}

impl Credentials {
    /// Bundle a username and password
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Capability that turns credentials into a session
pub trait CredentialValidator: Send + Sync {
    /// Validate `credentials`
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Authentication`] when the credentials are
    /// rejected
    fn validate(&self, credentials: &Credentials) -> Result<Session>;
}

/// Compares credentials against one fixed admin username/password pair
#[derive(Clone)]
pub struct StaticCredentialValidator {
    username: String,
    password: String,
}

impl StaticCredentialValidator {
    /// Accept exactly `username` / `password`
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Accept the pair configured under `auth`
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefdesk::config::AuthConfig;
    /// use reliefdesk::session::{CredentialValidator, Credentials, StaticCredentialValidator};
    ///
    /// let validator = StaticCredentialValidator::from_config(&AuthConfig::default());
    /// let session = validator.validate(&Credentials::new("admin", "admin123")).unwrap();
    /// assert!(session.is_admin());
    /// ```
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.admin_username.clone(), config.admin_password.clone())
    }
}

impl fmt::Debug for StaticCredentialValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentialValidator")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl CredentialValidator for StaticCredentialValidator {
    fn validate(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.username == self.username && credentials.password == self.password {
            tracing::debug!(username = %credentials.username, "Credentials accepted");
            Session::new(credentials.username.clone(), Role::Admin)
        } else {
            tracing::debug!(username = %credentials.username, "Credentials rejected");
            Err(ReliefError::Authentication("Invalid username or password".to_string()).into())
        }
    }
}
