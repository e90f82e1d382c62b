//! Aggregate statistics for the dashboard view

use crate::api::models::{CampaignStatus, InstagramAccount, Template};
use crate::api::{AccountsApi, ApiClient, CampaignsApi, TemplatesApi};
use crate::error::DeskResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Summary of accounts, templates and campaigns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_accounts: usize,
    pub active_accounts: usize,
    /// Accounts keyed by backend login status (`pending`, `success`, ...)
    pub accounts_by_status: BTreeMap<String, usize>,
    pub total_templates: usize,
    pub total_campaigns: usize,
    pub campaigns_by_status: BTreeMap<String, usize>,
    pub messages_sent: u64,
    pub messages_failed: u64,
    /// Percentage of attempted messages that were sent, `None` before any attempt
    pub success_rate: Option<f64>,
}

impl DashboardStats {
    pub fn collect(
        accounts: &[InstagramAccount],
        templates: &[Template],
        campaigns: &[CampaignStatus],
    ) -> Self {
        let mut accounts_by_status = BTreeMap::new();
        for account in accounts {
            *accounts_by_status
                .entry(account.login_status.clone())
                .or_insert(0) += 1;
        }

        let mut campaigns_by_status = BTreeMap::new();
        for campaign in campaigns {
            *campaigns_by_status.entry(campaign.status.clone()).or_insert(0) += 1;
        }

        let messages_sent = campaigns.iter().map(|c| c.sent_messages).sum();
        let messages_failed = campaigns.iter().map(|c| c.failed_messages).sum();

        Self {
            total_accounts: accounts.len(),
            active_accounts: accounts.iter().filter(|a| a.is_active).count(),
            accounts_by_status,
            total_templates: templates.len(),
            total_campaigns: campaigns.len(),
            campaigns_by_status,
            messages_sent,
            messages_failed,
            success_rate: success_rate(messages_sent, messages_failed),
        }
    }

    /// Fetch accounts, templates and campaigns concurrently and aggregate them
    pub async fn fetch(client: &ApiClient) -> DeskResult<Self> {
        let accounts = AccountsApi::new(client.clone());
        let templates = TemplatesApi::new(client.clone());
        let campaigns = CampaignsApi::new(client.clone());

        let (accounts, templates, campaigns) =
            tokio::join!(accounts.list(), templates.list(), campaigns.list());

        Ok(Self::collect(
            &accounts?.accounts,
            &templates?.templates,
            &campaigns?,
        ))
    }
}

fn success_rate(sent: u64, failed: u64) -> Option<f64> {
    let attempted = sent + failed;
    if attempted == 0 {
        return None;
    }
    Some(sent as f64 * 100.0 / attempted as f64)
}
