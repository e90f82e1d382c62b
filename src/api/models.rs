//! Wire models shared with the backend

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generic envelope returned by mutating endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<BTreeMap<String, String>>>,
}

impl ApiResponse {
    /// Fetch a field from `data`
    pub fn data_field(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.as_ref().and_then(|d| d.get(key))
    }
}

/// A managed Instagram account
#[derive(Clone, Serialize, Deserialize)]
pub struct InstagramAccount {
    pub username: String,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub last_login: Option<NaiveDateTime>,

    #[serde(default = "default_login_status")]
    pub login_status: String,

    #[serde(default)]
    pub error_message: Option<String>,
}

impl std::fmt::Debug for InstagramAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramAccount")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("is_active", &self.is_active)
            .field("last_login", &self.last_login)
            .field("login_status", &self.login_status)
            .field("error_message", &self.error_message)
            .finish()
    }
}

fn default_true() -> bool {
    true
}

fn default_login_status() -> String {
    "pending".to_string()
}

/// Response of `GET /accounts/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountList {
    pub accounts: Vec<InstagramAccount>,
    #[serde(default)]
    pub total: usize,
}

/// Credentials for a new account
#[derive(Serialize)]
pub struct NewAccount<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// A message template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Response of `GET /templates/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateList {
    pub templates: Vec<Template>,
    #[serde(default)]
    pub total: usize,
}

/// Progress of a bulk DM campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignStatus {
    pub campaign_id: String,
    pub total_messages: u64,
    pub sent_messages: u64,
    pub failed_messages: u64,
    pub status: String,
    #[serde(default)]
    pub errors: Vec<BTreeMap<String, String>>,
    pub start_time: NaiveDateTime,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

impl CampaignStatus {
    /// Messages neither sent nor failed yet
    pub fn pending_messages(&self) -> u64 {
        self.total_messages
            .saturating_sub(self.sent_messages + self.failed_messages)
    }
}

/// Auto-reply settings for one account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoReplyConfig {
    #[serde(default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub template_id: Option<String>,
    /// Match rules for incoming messages, e.g. `contains = price`
    #[serde(default)]
    pub conditions: BTreeMap<String, String>,
}

impl AutoReplyConfig {
    pub fn enabled(template_id: impl Into<String>, conditions: BTreeMap<String, String>) -> Self {
        Self {
            is_enabled: true,
            template_id: Some(template_id.into()),
            conditions,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }
}

/// What the backend reports after accepting a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignLaunch {
    pub campaign_id: String,
    pub total_recipients: u64,
    /// Recipient rows the backend skipped
    pub errors: Vec<String>,
}

/// A generated template draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateSuggestion {
    /// Tone label, e.g. `casual`
    pub style: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_defaults_fill_missing_fields() {
        let account: InstagramAccount = serde_json::from_str(r#"{"username":"shop.one"}"#).unwrap();
        assert!(account.is_active);
        assert_eq!(account.login_status, "pending");
        assert!(account.last_login.is_none());
    }

    #[test]
    fn account_parses_backend_timestamps() {
        let account: InstagramAccount = serde_json::from_str(
            r#"{"username":"shop.one","password":"pw","last_login":"2024-05-01T10:20:30.123456","login_status":"success"}"#,
        )
        .unwrap();
        assert_eq!(
            account.last_login.unwrap().format("%Y-%m-%d %H:%M").to_string(),
            "2024-05-01 10:20"
        );
    }

    #[test]
    fn account_debug_hides_password() {
        let account: InstagramAccount =
            serde_json::from_str(r#"{"username":"a","password":"hunter2"}"#).unwrap();
        let debug = format!("{:?}", account);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn campaign_pending_count() {
        let campaign: CampaignStatus = serde_json::from_str(
            r#"{"campaign_id":"c1","total_messages":10,"sent_messages":6,"failed_messages":1,
                "status":"running","start_time":"2024-05-01T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(campaign.pending_messages(), 3);
        assert!(campaign.errors.is_empty());
    }

    #[test]
    fn auto_reply_disabled_serializes_defaults() {
        let value = serde_json::to_value(AutoReplyConfig::disabled()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"is_enabled": false, "template_id": null, "conditions": {}})
        );
    }

    #[test]
    fn envelope_data_field() {
        let resp: ApiResponse = serde_json::from_str(
            r#"{"success":true,"message":"ok","data":{"template_id":"t-1"}}"#,
        )
        .unwrap();
        assert_eq!(resp.data_field("template_id").and_then(|v| v.as_str()), Some("t-1"));
        assert!(resp.errors.is_none());
    }
}
