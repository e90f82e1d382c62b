//! Session record and its persisted form

use crate::error::{DeskError, DeskResult};
use serde::{Deserialize, Serialize};

/// Key the session record is stored under
pub const SESSION_KEY: &str = "user";

/// The authenticated operator
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Backend user identifier
    #[serde(rename = "id")]
    pub user_id: String,

    pub username: String,

    /// Bearer credential attached to API requests
    #[serde(rename = "token")]
    pub auth_token: String,

    /// Operator role, e.g. "admin"
    pub role: String,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("auth_token", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

impl Session {
    /// Serialize for the key-value store
    pub fn to_record(&self) -> DeskResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored record
    pub fn from_record(record: &str) -> DeskResult<Self> {
        Ok(serde_json::from_str(record)?)
    }

    /// Shallow merge: fields present in the patch replace ours
    pub fn merged(&self, patch: &SessionPatch) -> Self {
        Self {
            user_id: patch.user_id.clone().unwrap_or_else(|| self.user_id.clone()),
            username: patch.username.clone().unwrap_or_else(|| self.username.clone()),
            auth_token: patch
                .auth_token
                .clone()
                .unwrap_or_else(|| self.auth_token.clone()),
            role: patch.role.clone().unwrap_or_else(|| self.role.clone()),
        }
    }
}

/// Partial update for a [`Session`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPatch {
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SessionPatch {
    pub fn role(role: impl Into<String>) -> Self {
        Self {
            role: Some(role.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.username.is_none()
            && self.auth_token.is_none()
            && self.role.is_none()
    }
}

/// Profile returned alongside the token
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "user_id")]
    pub id: String,
    pub username: String,
    pub role: String,
}

/// Body of a successful authentication response.
///
/// Accepts `{"token", "user": {...}}` (or `access_token`) and the flat
/// record layout `{"id", "username", "token", "role"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LoginResponse {
    Nested {
        #[serde(alias = "access_token")]
        token: String,
        user: UserProfile,
    },
    Flat(Session),
}

impl LoginResponse {
    pub fn into_session(self) -> DeskResult<Session> {
        let session = match self {
            Self::Nested { token, user } => Session {
                user_id: user.id,
                username: user.username,
                auth_token: token,
                role: user.role,
            },
            Self::Flat(session) => session,
        };

        if session.auth_token.trim().is_empty() {
            return Err(DeskError::UnexpectedResponse(
                "login response carried an empty token".to_string(),
            ));
        }
        Ok(session)
    }
}

/// Credentials posted to the authentication endpoint
#[derive(Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
