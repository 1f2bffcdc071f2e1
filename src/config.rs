//! Configuration management for Reliefdesk
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, ReliefError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Reliefdesk
///
/// Holds everything the client needs at startup: where the backend lives,
/// where the operator session is persisted, the admin credential pair and
/// terminal rendering preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend REST API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Durable session storage settings
    #[serde(default)]
    pub session: SessionConfig,
    /// Credentials accepted by the login view
    #[serde(default)]
    pub auth: AuthConfig,
    /// Terminal rendering settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the version prefix (e.g. `http://localhost:8081/api/v1`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_api_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:8081/api/v1".to_string()
}

fn default_api_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_api_timeout(),
        }
    }
}

/// Storage medium backing the durable session record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionBackend {
    /// JSON key-value file in the user data directory
    #[default]
    File,
    /// OS native credential store
    Keyring,
    /// Process-local map; nothing survives a restart
    Memory,
}

impl SessionBackend {
    /// Parse a backend name as accepted by config files and env vars
    ///
    /// # Examples
    ///
    /// ```
    /// use reliefdesk::config::SessionBackend;
    ///
    /// assert_eq!(SessionBackend::parse_str("Keyring"), Some(SessionBackend::Keyring));
    /// assert_eq!(SessionBackend::parse_str("cloud"), None);
    /// ```
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "file" => Some(Self::File),
            "keyring" => Some(Self::Keyring),
            "memory" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Durable session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Which storage medium holds the session record
    #[serde(default)]
    pub backend: SessionBackend,

    /// Override for the file backend location
    ///
    /// When unset, the file lives in the platform data directory
    /// (see [`crate::storage::FileStore::default_path`]).
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Key under which the serialized session is stored
    #[serde(default = "default_session_key")]
    pub key: String,
}

fn default_session_key() -> String {
    "user".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            path: None,
            key: default_session_key(),
        }
    }
}

/// Admin credential configuration
///
/// The login view compares submitted credentials against this pair. It is
/// a placeholder gate, not an authentication protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Accepted admin username
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Accepted admin password
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: default_admin_password(),
        }
    }
}

/// Terminal rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Rows per page in list views
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Colorize terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_page_size() -> usize {
    10
}

fn default_color() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. Environment variables override the file and CLI flags
    /// override both.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ReliefError::Config(format!("Failed to read {}: {}", path, e)))?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("RELIEFDESK_API_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("RELIEFDESK_API_TIMEOUT") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid RELIEFDESK_API_TIMEOUT: {}", timeout);
            }
        }

        if let Ok(backend) = std::env::var("RELIEFDESK_SESSION_BACKEND") {
            match SessionBackend::parse_str(&backend) {
                Some(value) => self.session.backend = value,
                None => tracing::warn!("Invalid session backend: {}, keeping current", backend),
            }
        }

        if let Ok(path) = std::env::var("RELIEFDESK_SESSION_PATH") {
            tracing::debug!(path = %path, "Env override: RELIEFDESK_SESSION_PATH");
            self.session.path = Some(PathBuf::from(path));
        }

        if let Ok(page_size) = std::env::var("RELIEFDESK_PAGE_SIZE") {
            if let Ok(value) = page_size.parse() {
                self.ui.page_size = value;
            } else {
                tracing::warn!("Invalid RELIEFDESK_PAGE_SIZE: {}", page_size);
            }
        }

        if let Ok(username) = std::env::var("RELIEFDESK_ADMIN_USERNAME") {
            self.auth.admin_username = username;
        }

        if let Ok(password) = std::env::var("RELIEFDESK_ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }

        if let Some(session_file) = &cli.session_file {
            self.session.backend = SessionBackend::File;
            self.session.path = Some(session_file.clone());
        }

        if cli.ephemeral {
            self.session.backend = SessionBackend::Memory;
        }

        if cli.no_color {
            self.ui.color = false;
        }
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns [`ReliefError::Config`] describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(ReliefError::Config("api.base_url cannot be empty".to_string()).into());
        }

        match url::Url::parse(&self.api.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ReliefError::Config(format!(
                    "api.base_url must use http or https, got: {}",
                    parsed.scheme()
                ))
                .into());
            }
            Err(e) => {
                return Err(ReliefError::Config(format!(
                    "Invalid api.base_url {}: {}",
                    self.api.base_url, e
                ))
                .into());
            }
        }

        if self.api.timeout_seconds == 0 {
            return Err(ReliefError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.key.trim().is_empty() {
            return Err(ReliefError::Config("session.key cannot be empty".to_string()).into());
        }

        if self.auth.admin_username.trim().is_empty() {
            return Err(
                ReliefError::Config("auth.admin_username cannot be empty".to_string()).into(),
            );
        }

        if self.ui.page_size == 0 {
            return Err(
                ReliefError::Config("ui.page_size must be greater than 0".to_string()).into(),
            );
        }

        if self.ui.page_size > 100 {
            return Err(ReliefError::Config(
                "ui.page_size must be less than or equal to 100".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::test_utils::{create_test_file, temp_dir, test_config, test_config_yaml};
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8081/api/v1");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.session.backend, SessionBackend::File);
        assert_eq!(config.session.key, "user");
        assert_eq!(config.ui.page_size, 10);
    }

    #[test]
    fn test_config_validation_success() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_base_url() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_rejects_non_http_scheme() {
        let mut config = Config::default();
        config.api.base_url = "ftp://relief.example/api/v1".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("http or https"));
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_session_key() {
        let mut config = Config::default();
        config.session.key = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_page_size_bounds() {
        let mut config = Config::default();
        config.ui.page_size = 0;
        assert!(config.validate().is_err());

        config.ui.page_size = 101;
        assert!(config.validate().is_err());

        config.ui.page_size = 100;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = r#"
api:
  base_url: https://relief.example.org/api/v1
  timeout_seconds: 5
session:
  backend: keyring
  key: operator
auth:
  admin_username: coordinator
  admin_password: s3cret
ui:
  page_size: 25
  color: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "https://relief.example.org/api/v1");
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.session.backend, SessionBackend::Keyring);
        assert_eq!(config.session.key, "operator");
        assert_eq!(config.auth.admin_username, "coordinator");
        assert_eq!(config.ui.page_size, 25);
        assert!(!config.ui.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("ui:\n  page_size: 5\n").unwrap();
        assert_eq!(config.ui.page_size, 5);
        assert_eq!(config.api.base_url, default_base_url());
        assert_eq!(config.auth.admin_password, "admin123");
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "config.yaml", &test_config_yaml());

        let config = Config::load(path.to_str().unwrap(), &Cli::default()).unwrap();
        assert_eq!(config.api.base_url, "http://relief.example.org/api/v1");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.auth.admin_username, "coordinator");
        assert_eq!(config.ui.page_size, 25);
        assert!(!config.ui.color);
    }

    #[test]
    #[serial]
    fn test_load_invalid_yaml_fails() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "config.yaml", "ui: [unclosed");
        assert!(Config::load(path.to_str().unwrap(), &Cli::default()).is_err());
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file_uses_defaults() {
        let cli = Cli::default();
        let config = Config::load("/nonexistent/reliefdesk.yaml", &cli).unwrap();
        assert_eq!(config.session.key, "user");
    }

    #[test]
    #[serial]
    fn test_apply_env_vars_overrides_fields() {
        std::env::set_var("RELIEFDESK_API_URL", "http://backend.local:9000/api/v1");
        std::env::set_var("RELIEFDESK_SESSION_BACKEND", "memory");
        std::env::set_var("RELIEFDESK_PAGE_SIZE", "not-a-number");

        let mut config = Config::default();
        config.apply_env_vars();

        std::env::remove_var("RELIEFDESK_API_URL");
        std::env::remove_var("RELIEFDESK_SESSION_BACKEND");
        std::env::remove_var("RELIEFDESK_PAGE_SIZE");

        assert_eq!(config.api.base_url, "http://backend.local:9000/api/v1");
        assert_eq!(config.session.backend, SessionBackend::Memory);
        // invalid numbers are ignored
        assert_eq!(config.ui.page_size, 10);
    }

    #[test]
    fn test_cli_overrides_session_file_and_ephemeral() {
        let mut cli = Cli::default();
        cli.session_file = Some(PathBuf::from("/tmp/session.json"));
        cli.api_url = Some("http://127.0.0.1:8081/api/v1".to_string());

        let mut config = Config::default();
        config.session.backend = SessionBackend::Keyring;
        config.apply_cli_overrides(&cli);
        assert_eq!(config.session.backend, SessionBackend::File);
        assert_eq!(config.session.path, Some(PathBuf::from("/tmp/session.json")));
        assert_eq!(config.api.base_url, "http://127.0.0.1:8081/api/v1");

        cli.ephemeral = true;
        config.apply_cli_overrides(&cli);
        assert_eq!(config.session.backend, SessionBackend::Memory);
    }
}
