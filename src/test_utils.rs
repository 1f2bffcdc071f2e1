//! Test utilities for Reliefdesk
//!
//! This module provides common test utilities: temporary files, error
//! assertions, ready-made auth contexts and API clients pointed at a
//! mock backend.

use crate::api::ApiClient;
use crate::config::{ApiConfig, Config};
use crate::error::Result;
use crate::session::{AuthContext, Session, SessionStore};
use crate::storage::MemoryStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// # Returns
///
/// Returns a TempDir that will be cleaned up when dropped
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// Assert that an error contains the expected message
///
/// # Panics
///
/// Panics if the result is Ok or if the error doesn't contain the expected message
pub fn assert_error_contains<T>(result: Result<T>, expected: &str) {
    match result {
        Ok(_) => panic!("Expected error containing '{}' but got Ok", expected),
        Err(e) => {
            let error_msg = e.to_string();
            assert!(
                error_msg.contains(expected),
                "Error message '{}' does not contain '{}'",
                error_msg,
                expected
            );
        }
    }
}

/// Restored auth context over an in-memory store, optionally logged in
pub async fn ready_auth(session: Option<Session>) -> AuthContext {
    let mut auth = AuthContext::new(SessionStore::new(Box::new(MemoryStore::new()), "user"));
    auth.restore().await;
    if let Some(session) = session {
        auth.login(session).await;
    }
    auth
}

/// API client for a mock backend serving `/api/v1` at `server_uri`
pub fn api_for(server_uri: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: format!("{}/api/v1", server_uri),
        timeout_seconds: 5,
    })
    .expect("Failed to build API client")
}

/// Create a test configuration with default values
pub fn test_config() -> Config {
    Config::default()
}

/// Configuration YAML covering every section
pub fn test_config_yaml() -> String {
    r#"
api:
  base_url: http://relief.example.org/api/v1
  timeout_seconds: 10
session:
  backend: memory
  key: user
auth:
  admin_username: coordinator
  admin_password: s3cret
ui:
  page_size: 25
  color: false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReliefError;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "content");
    }

    #[test]
    fn test_assert_error_contains_success() {
        let result: Result<()> = Err(ReliefError::Config("test error message".to_string()).into());
        assert_error_contains(result, "test error");
    }

    #[test]
    #[should_panic(expected = "Expected error containing")]
    fn test_assert_error_contains_ok() {
        let result: Result<()> = Ok(());
        assert_error_contains(result, "error");
    }

    #[test]
    #[should_panic(expected = "does not contain")]
    fn test_assert_error_contains_wrong_message() {
        let result: Result<()> = Err(ReliefError::Config("different error".to_string()).into());
        assert_error_contains(result, "not present");
    }

    #[tokio::test]
    async fn test_ready_auth() {
        let auth = ready_auth(None).await;
        assert!(auth.is_ready());
        assert!(auth.session().is_none());
    }

    #[test]
    fn test_test_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_test_config_yaml() {
        let config: Config = serde_yaml::from_str(&test_config_yaml()).unwrap();
        assert_eq!(config.ui.page_size, 25);
        assert_eq!(config.auth.admin_username, "coordinator");
        assert!(config.validate().is_ok());
    }
}
