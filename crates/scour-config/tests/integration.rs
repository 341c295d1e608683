//! Integration tests for scour-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> resolve -> merge.

#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use scour_config::{CONFIG_FILENAME, Config, ConfigError};

/// Test helper owning a temporary directory tree.
struct TestEnv {
    /// Backing temporary directory.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes a config file into `rel_dir` and returns its path.
    fn write_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let dir = self.create_dir(rel_dir);
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_no_config_returns_default() {
    let env = TestEnv::new();
    let config = Config::load(env.path()).unwrap();

    assert!(config.config_root.is_none());
    assert_eq!(config.settings.database, "master");
    assert_eq!(config.index.stemmer, "english");
}

#[test]
fn test_load_nested_configs() {
    let env = TestEnv::new();
    env.write_config(
        "",
        r#"
root = true

[settings]
database = "master"
default_language = "da-DK"

[index]
root = "indexes"
"#,
    );
    env.write_config(
        "web",
        r#"
[settings]
database = "Web"
"#,
    );
    let cwd = env.create_dir("web/renderings");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.settings.database, "Web");
    assert_eq!(config.settings.default_language, "da-DK");
    assert_eq!(config.default_index_name(), "content_web_index");
    assert_eq!(config.config_root, Some(env.path().join("web")));
    assert_eq!(config.index_root(), Some(env.path().join("indexes")));
}

#[test]
fn test_index_root_defaults_beside_closest_config() {
    let env = TestEnv::new();
    env.write_config("site", "root = true\n");

    let config = Config::load(&env.path().join("site")).unwrap();

    assert_eq!(
        config.index_root(),
        Some(env.path().join("site").join(".scour").join("indexes"))
    );
}

#[test]
fn test_load_invalid_toml_fails() {
    let env = TestEnv::new();
    let path = env.write_config("", "root = true\n[settings\n");

    let err = Config::load(env.path()).unwrap_err();
    match err {
        ConfigError::ParseToml { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn test_load_from_files_empty() {
    let config = Config::load_from_files(&[]).unwrap();
    assert!(config.config_root.is_none());
}
