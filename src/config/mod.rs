//! Configuration management for dmdesk

pub mod schema;

pub use schema::Config;

use crate::error::{DeskError, DeskResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV: &str = "DMDESK_API_URL";

/// Environment variable overriding the state directory
pub const STATE_DIR_ENV: &str = "DMDESK_STATE_DIR";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dmdesk")
            .join("config.toml")
    }

    /// Get the state directory path
    pub fn state_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(STATE_DIR_ENV) {
            return PathBuf::from(dir);
        }

        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dmdesk")
    }

    /// Get the persistent key-value store directory
    pub fn store_dir() -> PathBuf {
        Self::state_dir().join("store")
    }

    /// Get the audit log path
    pub fn audit_log_path() -> PathBuf {
        Self::state_dir().join("audit.log")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> DeskResult<Config> {
        let mut config = if self.config_path.exists() {
            self.load_from_file(&self.config_path).await?
        } else {
            debug!("Config file not found, using defaults");
            Config::default()
        };

        apply_env_overrides(&mut config);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> DeskResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DeskError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| DeskError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> DeskResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            DeskError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> DeskResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DeskError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Ensure all state directories exist
    pub async fn ensure_state_dirs() -> DeskResult<()> {
        let dirs = [Self::state_dir(), Self::store_dir()];

        for dir in &dirs {
            fs::create_dir_all(dir).await.map_err(|e| {
                DeskError::io(format!("creating directory {}", dir.display()), e)
            })?;
        }

        // The store holds bearer tokens
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            std::fs::set_permissions(Self::store_dir(), perms)
                .map_err(|e| DeskError::io("setting store dir permissions", e))?;
        }

        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            debug!("Using API base URL from {}", API_URL_ENV);
            config.api.base_url = url.trim().to_string();
        }
    }
}
