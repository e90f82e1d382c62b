//! Bulk DM endpoints: campaign launch and status, account auto-reply

use super::models::{ApiResponse, AutoReplyConfig, CampaignLaunch, CampaignStatus};
use super::upload::load_csv;
use super::{ApiClient, ApiRequest, ProgressFn, API_PREFIX};
use crate::error::{DeskError, DeskResult};
use std::path::Path;
use tracing::{debug, info};

/// Columns a recipient list must carry
const RECIPIENT_COLUMNS: [&str; 2] = ["username", "name"];

/// Client for `/api/v1/dmer`
#[derive(Clone)]
pub struct CampaignsApi {
    client: ApiClient,
}

impl CampaignsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(suffix: &str) -> String {
        format!("{}/dmer{}", API_PREFIX, suffix)
    }

    fn campaign_path(id: &str) -> String {
        Self::path(&format!("/campaigns/{}", urlencoding::encode(id)))
    }

    pub async fn list(&self) -> DeskResult<Vec<CampaignStatus>> {
        self.client.get_json(&Self::path("/campaigns")).await
    }

    pub async fn get(&self, id: &str) -> DeskResult<CampaignStatus> {
        self.client.get_json(&Self::campaign_path(id)).await
    }

    pub async fn delete(&self, id: &str) -> DeskResult<ApiResponse> {
        self.client.delete_json(&Self::campaign_path(id)).await
    }

    /// Start sending `template_id` to every recipient in a CSV.
    ///
    /// Without `account` the backend picks the first stored account.
    pub async fn start(
        &self,
        template_id: &str,
        recipients: &Path,
        account: Option<&str>,
        progress: Option<ProgressFn>,
    ) -> DeskResult<CampaignLaunch> {
        let upload = load_csv(recipients, &RECIPIENT_COLUMNS, "recipients.csv").await?;
        debug!(
            "Starting campaign with {} ({} recipients)",
            recipients.display(),
            upload.rows
        );

        let mut request = ApiRequest::post(Self::path("/send"))
            .query("template_id", template_id)
            .multipart(upload.form);
        if let Some(account) = account {
            request = request.query("instagram_account_username", account);
        }
        if let Some(progress) = progress {
            request = request.progress(progress);
        }

        let response: ApiResponse = self.client.send_json(request).await?;
        let launch = launch_from(&response)?;
        info!(
            "Campaign {} started for {} recipients",
            launch.campaign_id, launch.total_recipients
        );
        Ok(launch)
    }

    /// Turn auto-reply on or off for an account
    pub async fn configure_auto_reply(
        &self,
        username: &str,
        config: &AutoReplyConfig,
    ) -> DeskResult<ApiResponse> {
        let path = Self::path(&format!("/auto-reply/{}", urlencoding::encode(username)));
        self.client.post_json(&path, config).await
    }
}

fn launch_from(response: &ApiResponse) -> DeskResult<CampaignLaunch> {
    let campaign_id = response
        .data_field("campaign_id")
        .and_then(|v| v.as_str())
        .ok_or_else(|| DeskError::UnexpectedResponse("campaign started without an id".to_string()))?
        .to_string();
    let total_recipients = response
        .data_field("total_recipients")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let errors = response
        .data_field("errors")
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .map(|item| item.as_str().map(str::to_string).unwrap_or_else(|| item.to_string()))
                .collect()
        })
        .unwrap_or_default();

    Ok(CampaignLaunch {
        campaign_id,
        total_recipients,
        errors,
    })
}
