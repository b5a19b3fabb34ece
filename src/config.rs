//! Configuration management for QuoteSync.
//!
//! This module handles loading and saving application configuration
//! to/from a JSON file. The config directory can be customized.
//!
//! Sync-related settings:
//! - server_url: the remote collection endpoint
//! - sync_interval_secs: the scheduler's fixed polling interval
//! - request_timeout_secs: bound on every fetch/push

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{QuoteError, QuoteResult};

fn default_server_url() -> String {
    "https://jsonplaceholder.typicode.com/posts".to_string()
}

fn default_sync_interval_secs() -> u64 {
    15
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigData {
    /// Remote collection endpoint URL
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Fixed interval between reconciliation cycles, in seconds
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
    /// Bound applied to each fetch/push request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Directory holding the durable quote cache
    #[serde(default)]
    pub data_dir: String,
}

impl Default for ConfigData {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            sync_interval_secs: default_sync_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            data_dir: String::new(),
        }
    }
}

/// Configuration manager
pub struct Config {
    config_dir: PathBuf,
    config_file: PathBuf,
    data: ConfigData,
}

impl Config {
    /// Create a new configuration manager.
    ///
    /// With no directory given, the platform config directory is used.
    pub fn new(config_dir: Option<PathBuf>) -> QuoteResult<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("quotesync"),
        };

        fs::create_dir_all(&config_dir)?;
        let config_file = config_dir.join("config.json");

        let mut data = if config_file.exists() {
            match fs::read_to_string(&config_file) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => ConfigData::default(),
            }
        } else {
            ConfigData::default()
        };

        if data.data_dir.is_empty() {
            data.data_dir = config_dir.join("data").to_string_lossy().to_string();
        }

        let config = Self {
            config_dir,
            config_file,
            data,
        };

        // Save default config if it doesn't exist
        if !config.config_file.exists() {
            config.save()?;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> QuoteResult<()> {
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the remote collection endpoint URL
    pub fn server_url(&self) -> &str {
        &self.data.server_url
    }

    /// Set the remote collection endpoint URL
    pub fn set_server_url(&mut self, url: &str) -> QuoteResult<()> {
        if url.trim().is_empty() {
            return Err(QuoteError::Config("server_url cannot be empty".to_string()));
        }
        self.data.server_url = url.to_string();
        self.save()
    }

    /// Get the reconciliation interval
    pub fn sync_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.data.sync_interval_secs)
    }

    /// Set the reconciliation interval in seconds
    pub fn set_sync_interval_secs(&mut self, secs: u64) -> QuoteResult<()> {
        if secs == 0 {
            return Err(QuoteError::Config(
                "sync_interval_secs must be at least 1".to_string(),
            ));
        }
        self.data.sync_interval_secs = secs;
        self.save()
    }

    /// Get the per-request timeout
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.data.request_timeout_secs)
    }

    /// Get the durable data directory
    pub fn data_dir(&self) -> &str {
        &self.data.data_dir
    }

    /// Set the durable data directory
    pub fn set_data_dir(&mut self, dir: &str) -> QuoteResult<()> {
        self.data.data_dir = dir.to_string();
        self.save()
    }
}
