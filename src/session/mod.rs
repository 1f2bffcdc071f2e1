//! Operator session: model, durable store, and the shared auth context
//!
//! - [`Session`]: who is logged in and with which role
//! - [`SessionStore`]: sole owner of the session and its durable record
//! - [`AuthContext`]: the handle the rest of the client reads through
//! - [`CredentialValidator`]: the check the login view runs before
//!   committing a session

use crate::error::{Result, ReliefError};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod context;
pub mod credentials;
pub mod store;

pub use context::AuthContext;
pub use credentials::{CredentialValidator, Credentials, StaticCredentialValidator};
pub use store::SessionStore;

/// Authorization role attached to a session
///
/// `admin` is the only recognized privilege level. Any other role string
/// is kept verbatim so it round-trips through the durable record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Administrator, may open every view
    Admin,
    /// Any non-admin role
    Other(String),
}

impl Role {
    /// Role string as stored in the session record
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::Other(role) => role,
        }
    }

    /// Whether this role grants administrator access
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for Role {
    fn from(role: String) -> Self {
        if role == "admin" {
            Self::Admin
        } else {
            Self::Other(role)
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::from(role.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => "admin".to_string(),
            Role::Other(role) => role,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw shape of the durable session record
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionRecord {
    username: String,
    role: Role,
}

/// The currently authenticated operator
///
/// A `Session` is always fully populated: the username is non-empty and
/// the role is set. Absence of a session is modelled as `Option<Session>`
/// by its owners, never as a half-filled value.
///
/// # Examples
///
/// ```
/// use reliefdesk::session::{Role, Session};
///
/// let session = Session::new("admin", Role::Admin).unwrap();
/// assert!(session.is_admin());
/// assert!(Session::new("", Role::Admin).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord", into = "SessionRecord")]
pub struct Session {
    username: String,
    role: Role,
}

impl Session {
    /// Build a session for `username` with `role`
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Authentication`] if the username is blank
    pub fn new(username: impl Into<String>, role: impl Into<Role>) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(
                ReliefError::Authentication("username cannot be empty".to_string()).into(),
            );
        }
        Ok(Self {
            username,
            role: role.into(),
        })
    }

    /// Operator username
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Operator role
    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Whether the session carries the admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Serialize into the durable record format
    pub fn to_record(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a durable record
    ///
    /// # Errors
    ///
    /// Returns error for non-JSON content, missing fields, or a blank
    /// username
    pub fn from_record(record: &str) -> Result<Self> {
        Ok(serde_json::from_str(record)?)
    }
}

impl TryFrom<SessionRecord> for Session {
    type Error = String;

    fn try_from(record: SessionRecord) -> std::result::Result<Self, Self::Error> {
        if record.username.trim().is_empty() {
            return Err("username cannot be empty".to_string());
        }
        Ok(Self {
            username: record.username,
            role: record.role,
        })
    }
}

impl From<Session> for SessionRecord {
    fn from(session: Session) -> Self {
        Self {
            username: session.username,
            role: session.role,
        }
    }
}
