//! Application configuration.
//!
//! Configuration is stored in `.ticketdeck/config.yaml` and includes:
//! - The backend base URL (overridable with `TICKETDECK_API_URL`)
//! - The page size used when listing tickets

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DeckError, Result};

pub const CONFIG_DIR: &str = ".ticketdeck";
pub const API_URL_ENV: &str = "TICKETDECK_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PAGE_SIZE: u32 = 50;
/// Largest page the backend accepts
pub const MAX_PAGE_SIZE: u32 = 100;

pub const VALID_CONFIG_KEYS: &[&str] = &["api_url", "page_size"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the dashboard backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Tickets requested per page (1-100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        PathBuf::from(CONFIG_DIR).join("config.yaml")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from file, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            DeckError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Backend base URL, from the environment or the config file
    pub fn api_url(&self) -> Result<Url> {
        let raw = match env::var(API_URL_ENV) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => self.api_url.clone(),
        };

        Url::parse(raw.trim())
            .map_err(|e| DeckError::Config(format!("invalid api_url '{}': {}", raw.trim(), e)))
    }

    /// Validated page size
    pub fn page_size(&self) -> Result<u32> {
        validate_page_size(self.page_size)
    }

    /// Read a configuration value by key
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "api_url" => Ok(self.api_url.clone()),
            "page_size" => Ok(self.page_size.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a configuration value by key, validating it first
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_url" => {
                Url::parse(value.trim()).map_err(|e| {
                    DeckError::Config(format!("invalid api_url '{}': {}", value, e))
                })?;
                self.api_url = value.trim().to_string();
            }
            "page_size" => {
                let size = value.trim().parse::<u32>().map_err(|_| {
                    DeckError::Config(format!(
                        "invalid value '{value}' for page_size. Expected a number from 1 to {MAX_PAGE_SIZE}"
                    ))
                })?;
                self.page_size = validate_page_size(size)?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn validate_page_size(size: u32) -> Result<u32> {
    if (1..=MAX_PAGE_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(DeckError::Config(format!(
            "page_size must be between 1 and {MAX_PAGE_SIZE}, got {size}"
        )))
    }
}

fn unknown_key(key: &str) -> DeckError {
    DeckError::Config(format!(
        "unknown config key '{}'. Valid keys: {}",
        key,
        VALID_CONFIG_KEYS.join(", ")
    ))
}
