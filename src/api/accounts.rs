//! Account endpoints: list, add, bulk CSV upload, delete

use super::models::{AccountList, ApiResponse, InstagramAccount, NewAccount};
use super::upload::load_csv;
use super::{ApiClient, ApiRequest, ProgressFn, API_PREFIX};
use crate::error::DeskResult;
use std::path::Path;
use tracing::{debug, info};

/// Columns the backend requires in a bulk upload
const REQUIRED_COLUMNS: [&str; 2] = ["username", "password"];

/// Result of handing a CSV file to the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUploadReceipt {
    pub message: String,
    /// Accounts the backend queued for background processing
    pub total_accounts: u64,
    /// Row-level problems the backend reported
    pub errors: Vec<String>,
}

/// Client for `/api/v1/accounts`
#[derive(Clone)]
pub struct AccountsApi {
    client: ApiClient,
}

impl AccountsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(suffix: &str) -> String {
        format!("{}/accounts{}", API_PREFIX, suffix)
    }

    /// List all accounts
    pub async fn list(&self) -> DeskResult<AccountList> {
        self.client.get_json(&Self::path("/")).await
    }

    /// Fetch a single account
    pub async fn get(&self, username: &str) -> DeskResult<InstagramAccount> {
        self.client
            .get_json(&Self::path(&format!("/{}", urlencoding::encode(username))))
            .await
    }

    /// Add one account. The backend verifies the credentials before storing them.
    pub async fn create(&self, username: &str, password: &str) -> DeskResult<ApiResponse> {
        let response: ApiResponse = self
            .client
            .post_json(&Self::path("/"), &NewAccount { username, password })
            .await?;
        info!("Added account {}", username);
        Ok(response)
    }

    /// Upload a CSV of `username,password` rows
    pub async fn bulk_upload(
        &self,
        csv_path: &Path,
        progress: Option<ProgressFn>,
    ) -> DeskResult<BulkUploadReceipt> {
        let upload = load_csv(csv_path, &REQUIRED_COLUMNS, "accounts.csv").await?;
        debug!(
            "Uploading {} ({} rows, {} bytes)",
            csv_path.display(),
            upload.rows,
            upload.bytes
        );

        let mut request = ApiRequest::post(Self::path("/bulk")).multipart(upload.form);
        if let Some(progress) = progress {
            request = request.progress(progress);
        }

        let response: ApiResponse = self.client.send_json(request).await?;
        Ok(receipt_from(response))
    }

    /// Delete an account
    pub async fn delete(&self, username: &str) -> DeskResult<ApiResponse> {
        let response: ApiResponse = self
            .client
            .delete_json(&Self::path(&format!("/{}", urlencoding::encode(username))))
            .await?;
        info!("Deleted account {}", username);
        Ok(response)
    }

    /// Ask the backend to log the account in to Instagram
    pub async fn login(&self, username: &str) -> DeskResult<ApiResponse> {
        self.client
            .send_json(ApiRequest::post(Self::path(&format!(
                "/{}/login",
                urlencoding::encode(username)
            ))))
            .await
    }

    /// Ask the backend to drop the account's Instagram session
    pub async fn logout(&self, username: &str) -> DeskResult<ApiResponse> {
        self.client
            .send_json(ApiRequest::post(Self::path(&format!(
                "/{}/logout",
                urlencoding::encode(username)
            ))))
            .await
    }
}

fn receipt_from(response: ApiResponse) -> BulkUploadReceipt {
    let total_accounts = response
        .data_field("total_accounts")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let errors = response
        .data_field("errors")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .map(|item| match item.as_str() {
                    Some(s) => s.to_string(),
                    None => item.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    BulkUploadReceipt {
        message: response.message,
        total_accounts,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{client, ScriptedTransport};
    use crate::api::{Body, Method};
    use crate::error::DeskError;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[tokio::test]
    async fn list_parses_accounts() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            r#"{"accounts":[{"username":"a","login_status":"success"},{"username":"b","is_active":false}],"total":2}"#,
        );
        let (client, _slot) = client(Arc::clone(&transport));

        let list = AccountsApi::new(client).list().await.unwrap();

        assert_eq!(list.total, 2);
        assert!(!list.accounts[1].is_active);
        assert_eq!(transport.seen()[0].url, "http://localhost:8000/api/v1/accounts/");
    }

    #[tokio::test]
    async fn create_posts_credentials() {
        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            r#"{"success":true,"message":"Successfully added account alice","data":{"username":"alice"}}"#,
        );
        let (client, _slot) = client(Arc::clone(&transport));

        let resp = AccountsApi::new(client).create("alice", "secret1").await.unwrap();

        assert!(resp.success);
        let seen = &transport.seen()[0];
        assert_eq!(seen.method, Method::Post);
        match &seen.body {
            Body::Json(text) => {
                let value: serde_json::Value = serde_json::from_str(text).unwrap();
                assert_eq!(value["username"], "alice");
                assert_eq!(value["password"], "secret1");
            }
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_failure_carries_server_message() {
        let transport = ScriptedTransport::new();
        transport.respond(500, r#"{"detail":"Login failed: challenge_required"}"#);
        let (client, _slot) = client(Arc::clone(&transport));

        let err = AccountsApi::new(client).create("alice", "bad").await.unwrap_err();

        assert_eq!(err.server_message(), Some("Login failed: challenge_required"));
    }

    #[tokio::test]
    async fn bulk_upload_sends_multipart_and_reports_progress() {
        let temp = TempDir::new().unwrap();
        let csv = temp.path().join("accounts.csv");
        std::fs::write(&csv, "username,password\nalice,pw1\nbob,pw2\n").unwrap();

        let transport = ScriptedTransport::new();
        transport.respond(
            200,
            r#"{"success":true,"message":"Processing 2 accounts in background","data":{"total_accounts":2,"errors":[]}}"#,
        );
        let (client, _slot) = client(Arc::clone(&transport));

        let sent = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&sent);
        let progress: ProgressFn = Arc::new(move |done, _total| sink.store(done, Ordering::SeqCst));

        let receipt = AccountsApi::new(client)
            .bulk_upload(&csv, Some(progress))
            .await
            .unwrap();

        assert_eq!(receipt.total_accounts, 2);
        assert!(receipt.errors.is_empty());
        assert!(sent.load(Ordering::SeqCst) > 0);

        let seen = &transport.seen()[0];
        assert!(seen.url.ends_with("/api/v1/accounts/bulk"));
        match &seen.body {
            Body::Bytes { content_type, data } => {
                assert!(content_type.starts_with("multipart/form-data; boundary="));
                let text = String::from_utf8_lossy(data);
                assert!(text.contains("filename=\"accounts.csv\""));
                assert!(text.contains("alice,pw1"));
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn bulk_upload_rejects_bad_csv_locally() {
        let temp = TempDir::new().unwrap();
        let csv = temp.path().join("accounts.csv");
        std::fs::write(&csv, "name\nalice\n").unwrap();

        let transport = ScriptedTransport::new();
        let (client, _slot) = client(Arc::clone(&transport));

        let err = AccountsApi::new(client).bulk_upload(&csv, None).await.unwrap_err();

        assert!(matches!(err, DeskError::CsvInvalid { .. }));
        assert!(transport.seen().is_empty());
    }

    #[tokio::test]
    async fn delete_encodes_username() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"success":true,"message":"Successfully deleted account a b"}"#);
        let (client, _slot) = client(Arc::clone(&transport));

        AccountsApi::new(client).delete("a b").await.unwrap();

        let seen = &transport.seen()[0];
        assert_eq!(seen.method, Method::Delete);
        assert!(seen.url.ends_with("/api/v1/accounts/a%20b"));
    }

    #[test]
    fn receipt_collects_errors() {
        let response: ApiResponse = serde_json::from_str(
            r#"{"success":true,"message":"m","data":{"total_accounts":1,"errors":["Empty password found for username bob"]}}"#,
        )
        .unwrap();
        let receipt = receipt_from(response);
        assert_eq!(receipt.total_accounts, 1);
        assert_eq!(receipt.errors, vec!["Empty password found for username bob"]);
    }
}
