//! Append-only record of session changes
//!
//! One JSON object per line in `<state dir>/audit.log`:
//!
//! ```text
//! {"at":"2024-05-01T10:00:00+00:00","event":"session.login","role":"admin","username":"alice"}
//! ```
//!
//! Events carry operator names and outcomes. There is no field for a token
//! or password, so neither can end up in the file.

use crate::config::{schema::Config, ConfigManager};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Something that happened to the operator session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum AuditEvent {
    #[serde(rename = "session.login")]
    Login { username: String, role: String },

    #[serde(rename = "session.login_failed")]
    LoginFailed {
        username: String,
        /// HTTP status, absent when the backend was unreachable
        status: Option<u16>,
    },

    #[serde(rename = "session.logout")]
    Logout {
        username: Option<String>,
        storage_cleared: bool,
    },

    /// The backend rejected the session's token
    #[serde(rename = "session.expired")]
    Expired {
        username: Option<String>,
        storage_cleared: bool,
    },

    #[serde(rename = "session.updated")]
    Updated {
        username: String,
        fields: Vec<&'static str>,
    },
}

impl AuditEvent {
    fn to_line(&self, at: DateTime<Utc>) -> serde_json::Result<String> {
        let mut value = serde_json::to_value(self)?;
        if let Some(fields) = value.as_object_mut() {
            fields.insert("at".to_string(), serde_json::Value::String(at.to_rfc3339()));
        }
        let mut line = serde_json::to_string(&value)?;
        line.push('\n');
        Ok(line)
    }
}

/// Where audit events go; `None` when auditing is off
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: Option<PathBuf>,
}

impl AuditLog {
    /// Honor `general.audit_log`, writing under the state directory
    pub fn new(config: &Config) -> Self {
        Self {
            path: config
                .general
                .audit_log
                .then(ConfigManager::audit_log_path),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Append an event. Failures are logged; the session operation that
    /// produced the event has already happened and is not undone.
    pub async fn record(&self, event: AuditEvent) {
        let Some(path) = &self.path else {
            return;
        };

        let line = match event.to_line(Utc::now()) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not encode audit event {:?}: {}", event, e);
                return;
            }
        };

        if let Err(e) = append(path, &line).await {
            warn!("Could not append to {}: {}", path.display(), e);
        }
    }
}

async fn append(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}
