//! Configuration handling for the Stencil application.
//! The user configuration lists the template repositories to search and
//! lives under `~/.config/stencil` in either JSON or YAML form.

use crate::constants::{CONFIG_DIR, CONFIG_FILES};
use crate::error::{Error, Result};
use crate::repository::RepositoryInfo;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The user configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Template repositories, searched in order.
    #[serde(default)]
    pub repositories: Vec<RepositoryInfo>,
}

/// Returns the directory holding the user configuration.
pub fn config_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde(CONFIG_DIR).into_owned())
}

/// Returns the path of the configuration file in use: the first existing
/// candidate, or the primary candidate when none exists yet.
pub fn config_path() -> PathBuf {
    let dir = config_dir();
    for file in CONFIG_FILES {
        let candidate = dir.join(file);
        if candidate.exists() {
            return candidate;
        }
    }

    dir.join(CONFIG_FILES[0])
}

/// Loads the user configuration.
pub fn get_config() -> Result<Config> {
    load_config(&config_dir())
}

/// Loads configuration from a directory, trying multiple file formats.
/// Supports: stencil.json, stencil.yml, stencil.yaml
///
/// A missing file is not an error; it simply means no repositories have
/// been configured yet.
///
/// # Arguments
/// * `dir` - Directory containing the configuration
///
/// # Returns
/// * `Result<Config>` - The parsed configuration
///
/// # Errors
/// * `Error::ConfigError` if a file exists but cannot be parsed
pub fn load_config(dir: &Path) -> Result<Config> {
    for file in CONFIG_FILES {
        let config_path = dir.join(file);
        if config_path.exists() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return parse_config(&content);
        }
    }

    debug!("No configuration file found; using defaults");
    Ok(Config::default())
}

fn parse_config(content: &str) -> Result<Config> {
    // Try parsing as JSON first, then fall back to YAML.
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("invalid configuration format: {}", e))),
    }
}
