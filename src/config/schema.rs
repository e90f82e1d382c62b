//! Configuration schema for dmdesk
//!
//! Configuration is stored at `~/.config/dmdesk/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Backend API settings
    pub api: ApiConfig,

    /// Navigation targets
    pub navigation: NavigationConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,

    /// Enable session audit logging
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
            audit_log: true,
        }
    }
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/api/v1` prefix
    pub base_url: String,

    /// Path of the operator authentication endpoint
    pub login_path: String,

    /// Global request timeout in seconds
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            login_path: "/api/v1/auth/login".to_string(),
            timeout_secs: 30,
            user_agent: format!("dmdesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Where the console lands after login and logout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Landing location after a successful login
    pub landing: String,

    /// Location shown after logout
    pub login: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            landing: "/dashboard".to_string(),
            login: "/login".to_string(),
        }
    }
}
