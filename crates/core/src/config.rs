//! Application configuration.
//!
//! Values are layered: built-in defaults, then the optional JSON file under
//! the user's config directory, then `SLL_*` environment variables.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::list::SinglyLinkedList;

/// Directory under the platform config root holding `config.json`.
pub const CONFIG_DIR: &str = "sll";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.json";
/// Prefix for environment overrides, e.g. `SLL_BANNER_DELAY_MS`.
pub const ENV_PREFIX: &str = "SLL";

/// Runtime settings for the interactive shell and its list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Number of dots printed by the startup animation.
    pub banner_dots: u8,
    /// Pause after each startup dot, in milliseconds.
    pub banner_delay_ms: u64,
    /// Process exit code used when the operator quits.
    pub quit_exit_code: u8,
    /// Print the core status after operations that did not succeed.
    pub report_status: bool,
    /// Upper bound on live nodes; `None` means unbounded.
    pub max_nodes: Option<usize>,
    /// Directory receiving `sll.log`; defaults to `./logs`.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            banner_dots: 5,
            banner_delay_ms: 250,
            quit_exit_code: 1,
            report_status: false,
            max_nodes: None,
            log_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::build(&config_path(), true)
    }

    /// Load configuration from `path` alone, ignoring the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Self::build(path.as_ref(), false)
    }

    fn build(path: &Path, with_env: bool) -> Result<Self> {
        let mut builder = Config::builder().add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Json)
                .required(false),
        );
        if with_env {
            builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        }

        let settings = builder
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse configuration {}", path.display()))
    }

    /// Build the list the shell operates on, honouring `max_nodes`.
    pub fn new_list(&self) -> SinglyLinkedList {
        match self.max_nodes {
            Some(limit) => SinglyLinkedList::with_node_limit(limit),
            None => SinglyLinkedList::new(),
        }
    }

    /// Directory the log file is written to.
    pub fn log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()
                .context("failed to resolve working directory")?
                .join("logs")),
        }
    }
}

/// Default location of the configuration file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default configuration file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    write_default_config(config_path())
}

/// Startup loading that never fails: write the default file if missing, then
/// load it with environment overrides.
///
/// Any problem along the way is collected and the built-in defaults are used,
/// so an unwritable config directory never keeps the shell from starting.
pub fn load_or_default() -> (AppConfig, Vec<anyhow::Error>) {
    load_or_default_at(&config_path(), true)
}

/// [`load_or_default`] against an explicit file.
pub fn load_or_default_at(path: &Path, with_env: bool) -> (AppConfig, Vec<anyhow::Error>) {
    let mut problems = Vec::new();
    if let Err(err) = write_default_config(path) {
        problems.push(err);
    }
    let config = AppConfig::build(path, with_env).unwrap_or_else(|err| {
        problems.push(err);
        AppConfig::default()
    });
    (config, problems)
}

/// Write the default configuration to `path` unless a file is already there.
pub fn write_default_config(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }

    let serialized = serde_json::to_string_pretty(&AppConfig::default())
        .context("failed to serialize default configuration")?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!(path = %path.display(), "wrote default configuration");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.json"))?;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.banner_dots, 5);
        assert_eq!(config.banner_delay_ms, 250);
        assert_eq!(config.quit_exit_code, 1);
        Ok(())
    }

    #[test]
    fn default_file_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        write_default_config(&path)?;
        assert!(path.exists());

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    }

    #[test]
    fn existing_file_is_not_overwritten() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "quit_exit_code": 0 }"#)?;
        write_default_config(&path)?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.quit_exit_code, 0);
        Ok(())
    }

    #[test]
    fn partial_file_overrides_selected_fields() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"{ "banner_delay_ms": 0, "report_status": true, "max_nodes": 3 }"#,
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.banner_delay_ms, 0);
        assert!(config.report_status);
        assert_eq!(config.max_nodes, Some(3));
        assert_eq!(config.banner_dots, 5);
        assert_eq!(config.new_list().node_limit(), Some(3));
        Ok(())
    }

    #[test]
    fn malformed_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json")?;
        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }

    #[test]
    fn unwritable_location_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "")?;
        let path = blocker.join(CONFIG_DIR).join(CONFIG_FILE);

        let err = write_default_config(&path).expect_err("parent is a regular file");
        assert!(err.to_string().contains("failed to create config directory"));

        let (config, problems) = load_or_default_at(&path, false);
        assert_eq!(config, AppConfig::default());
        assert!(!problems.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "{ not json")?;

        let (config, problems) = load_or_default_at(&path, false);
        assert_eq!(config, AppConfig::default());
        assert_eq!(problems.len(), 1);
        Ok(())
    }

    #[test]
    fn healthy_location_loads_without_problems() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);

        let (config, problems) = load_or_default_at(&path, false);
        assert!(problems.is_empty());
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
        Ok(())
    }
}
