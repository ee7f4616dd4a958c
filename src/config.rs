use crate::changelog::render::DEFAULT_HOST;
use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name searched for in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "keepachangelog.toml";

/// Represents the complete configuration for keepachangelog-manager.
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Changelog file name relative to the repository root
    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,

    /// Remote whose URL names the repository owner
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Host used in footer compare links
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub repository: RepositoryConfig,
}

/// Explicit repository identity, bypassing git discovery for whichever field is set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            changelog_file: default_changelog_file(),
            remote: default_remote(),
            host: default_host(),
            repository: RepositoryConfig::default(),
        }
    }
}

/// Parse configuration from TOML text
pub fn parse_config(text: &str) -> Result<Config> {
    toml::from_str(text).map_err(|e| ChangelogError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `keepachangelog.toml` in current directory
/// 3. `keepachangelog.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed, or an explicit path is missing
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let path = match config_path {
        Some(path) => Some(PathBuf::from(path)),
        None => discover_config_file(),
    };

    let Some(path) = path else {
        debug!("no configuration file found, using defaults");
        return Ok(Config::default());
    };

    debug!(path = %path.display(), "loading configuration");
    let text = fs::read_to_string(&path).map_err(|e| {
        ChangelogError::config(format!("Cannot read '{}': {}", path.display(), e))
    })?;
    toml::from_str(&text)
        .map_err(|e| ChangelogError::config(format!("Invalid '{}': {}", path.display(), e)))
}

fn discover_config_file() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}
