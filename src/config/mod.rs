//
//  topsort-sdk
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Two layers of configuration live here:
//!
//! - [`ClientConfig`]: the validated, immutable settings a
//!   [`TopsortClient`](crate::api::TopsortClient) is built from
//! - [`Config`]: the `topsort` CLI's TOML file, stored in a
//!   platform-specific directory
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/topsort/config.toml`
//! - **macOS**: `~/Library/Application Support/topsort/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\topsort\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! api_key = "ts_live_..."
//! base_url = "https://api.topsort.com"
//! timeout = 10
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use topsort::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("timeout", "5".to_string())?;
//! config.save()?;
//!
//! let client_config = config.client_config()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

mod client;

pub use client::*;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Settings stored in the CLI configuration file.
///
/// All fields are optional; command-line flags and environment variables
/// take precedence over them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Topsort API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// API endpoint; the production endpoint when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            Ok(toml::from_str(&content)
                .with_context(|| format!("Invalid configuration in {}", path.display()))?)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// The file may not exist; this only returns where it would be.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the path to the data directory.
    ///
    /// Used for the persisted opaque user id.
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Gets a configuration value by key.
    ///
    /// | Key | Field |
    /// |-----|-------|
    /// | `"api_key"` | `api_key` |
    /// | `"base_url"` | `base_url` |
    /// | `"timeout"` | `timeout` |
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api_key" => self.api_key.clone(),
            "base_url" => self.base_url.clone(),
            "timeout" => self.timeout.map(|t| t.to_string()),
            _ => None,
        }
    }

    /// Sets a configuration value by key.
    ///
    /// Changes are only persisted when [`Config::save`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown keys or a non-numeric timeout.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        match key {
            "api_key" => self.api_key = Some(value),
            "base_url" => self.base_url = Some(value),
            "timeout" => {
                let secs = value
                    .parse()
                    .with_context(|| format!("Timeout must be a number of seconds, got '{}'", value))?;
                self.timeout = Some(secs);
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// Checks stored values without requiring an API key.
    pub fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.base_url {
            validate_base_url(base_url)?;
        }
        Ok(())
    }

    /// Builds a validated [`ClientConfig`] from these settings.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is set or the base URL is invalid.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No API key configured. Use --api-key or TOPSORT_API_KEY."))?;

        let mut config = ClientConfig::new(api_key)?;
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url)?;
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        Ok(config)
    }
}
