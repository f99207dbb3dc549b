use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{RelkitError, Result};

/// Represents the complete configuration for relkit.
///
/// Currently only holds the coordinates of the source-control host the
/// tag-resolution commands query.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GithubConfig,
}

/// Configuration for the GitHub collaborator.
///
/// The API token is deliberately not part of the file; it is read from
/// the `GITHUB_TOKEN` environment variable.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    #[serde(default)]
    pub owner: String,

    #[serde(default)]
    pub repo: String,

    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            owner: String::new(),
            repo: String::new(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl Config {
    /// Read the GitHub API token from the environment, if set.
    pub fn github_token() -> Option<String> {
        std::env::var("GITHUB_TOKEN").ok()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `relkit.toml` in current directory
/// 3. `.relkit.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./relkit.toml").exists() {
        fs::read_to_string("./relkit.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".relkit.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| RelkitError::config(e.to_string()))
}
