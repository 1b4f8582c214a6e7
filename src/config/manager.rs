//! Configuration manager for loading and saving application configuration
//!
//! Configuration lives in %APPDATA%\LaunchOnPlease\config.json and is written
//! atomically (temp file in the same directory, then rename) so a crash never
//! leaves a half-written file behind.

use crate::config::models::AppConfig;
use crate::error::{LaunchError, Result, StringError};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the per-user application directory under %APPDATA%
pub const APP_DIR_NAME: &str = "LaunchOnPlease";

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Get the application data directory
    ///
    /// Returns: %APPDATA%\LaunchOnPlease (falls back to the working directory)
    pub fn get_app_dir() -> PathBuf {
        let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(appdata).join(APP_DIR_NAME)
    }

    /// Get the path to the configuration file
    ///
    /// Returns: %APPDATA%\LaunchOnPlease\config.json
    pub fn get_config_path() -> PathBuf {
        Self::get_app_dir().join("config.json")
    }

    /// Load configuration from the default location
    pub fn load() -> Result<AppConfig> {
        Self::load_from(&Self::get_config_path())
    }

    /// Load configuration from `path`
    ///
    /// A missing or unparsable file yields the default configuration; only
    /// read errors on an existing file are reported.
    pub fn load_from(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let json = std::fs::read_to_string(path)?;

        match serde_json::from_str::<AppConfig>(&json) {
            Ok(mut config) => {
                config.preferences = config.preferences.sanitized();
                info!("Configuration loaded from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(config: &AppConfig) -> Result<()> {
        Self::save_to(config, &Self::get_config_path())
    }

    /// Save configuration to `path` with an atomic write
    pub fn save_to(config: &AppConfig, path: &Path) -> Result<()> {
        let config_dir = path.parent().ok_or_else(|| {
            LaunchError::ConfigError(StringError::new(format!(
                "Invalid config path: {}",
                path.display()
            )))
        })?;
        std::fs::create_dir_all(config_dir)?;

        let json = serde_json::to_string_pretty(config)?;

        let mut temp = tempfile::NamedTempFile::new_in(config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path)
            .map_err(|e| LaunchError::ConfigError(Box::new(e.error)))?;

        debug!("Configuration saved to {}", path.display());
        Ok(())
    }
}
