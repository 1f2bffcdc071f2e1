use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Config file that points the client at `base_url` and keeps the
/// session in `<tempdir>/session.json`
#[allow(dead_code)]
pub fn temp_workspace(base_url: &str) -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let session_path = temp_dir.path().join("session.json");
    let config_path = temp_dir.path().join("config.yaml");
    let contents = format!(
        "api:\n  base_url: {}\n  timeout_seconds: 5\nsession:\n  backend: file\n  path: {}\nui:\n  color: false\n",
        base_url,
        session_path.display()
    );
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path, session_path)
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Write a session record the way the file store lays it out
#[allow(dead_code)]
pub fn write_session(session_path: &Path, username: &str, role: &str) {
    let record = serde_json::json!({ "username": username, "role": role }).to_string();
    let map = serde_json::json!({ "user": record });
    fs::write(session_path, map.to_string()).expect("failed to write session file");
}
