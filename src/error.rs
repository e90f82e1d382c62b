//! Error types for dmdesk
//!
//! All modules use `DeskResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for dmdesk operations
pub type DeskResult<T> = Result<T, DeskError>;

/// All errors that can occur in dmdesk
#[derive(Error, Debug)]
pub enum DeskError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    // Session errors
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Session is still initializing")]
    Initializing,

    #[error("Failed to persist session: {0}")]
    SessionPersist(String),

    // API errors
    #[error("API error ({status}): {}", describe_status(*status, message.as_deref()))]
    Api {
        status: u16,
        /// Message supplied by the server, if the body carried one
        message: Option<String>,
    },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected API response: {0}")]
    UnexpectedResponse(String),

    // Storage errors
    #[error("Stored entry {key} is unreadable: {reason}")]
    StoreEntryCorrupt { key: String, reason: String },

    // Upload errors
    #[error("Invalid CSV file {path}: {reason}")]
    CsvInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),

    /// The failure was already shown to the user as a notification
    #[error("operation failed")]
    Reported,
}

impl DeskError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an API error from a status code and server message
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: Some(message.into()),
        }
    }

    /// Message the server attached to a failed response
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// HTTP status carried by the error, if it came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the backend rejected our credentials
    pub fn is_auth_rejection(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if the failure was already surfaced as a notification
    pub fn is_reported(&self) -> bool {
        matches!(self, Self::Reported)
    }

    /// Message suitable for a user notification.
    ///
    /// API errors show the server-provided text; everything else falls back
    /// to the display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { status, message } => describe_status(*status, message.as_deref()),
            other => other.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotAuthenticated => Some("Run: dmdesk login"),
            Self::Api { status: 401, .. } => Some("Session expired. Run: dmdesk login"),
            Self::Api { status: 403, .. } => Some("Your role does not allow this action"),
            Self::Transport(_) => Some("Check api.base_url with: dmdesk config show"),
            Self::InvalidBaseUrl(_) => Some("Run: dmdesk config set api.base_url <url>"),
            _ => None,
        }
    }
}

/// Server message if present, otherwise the canonical reason phrase
fn describe_status(status: u16, message: Option<&str>) -> String {
    if let Some(message) = message {
        return message.to_string();
    }

    let reason = match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Unexpected status",
    };
    reason.to_string()
}
