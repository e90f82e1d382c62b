//! Campaigns command - start and inspect bulk DM campaigns

use super::{confirm_delete, format_time, print_json};
use crate::api::models::CampaignStatus;
use crate::api::CampaignsApi;
use crate::app::Console;
use crate::cli::args::{CampaignsAction, CampaignsArgs, OutputFormat};
use crate::error::DeskResult;
use crate::ui::{self, UiContext, UploadProgress};
use console::style;
use std::path::Path;

/// Execute the campaigns command
pub async fn execute(args: CampaignsArgs, console: &Console) -> DeskResult<()> {
    console.require("/campaigns").await?;

    let api = console.campaigns();
    let ctx = console.ui();

    let result = match args.action {
        CampaignsAction::List { format } => list(&api, ctx, format).await,
        CampaignsAction::Show { id, format } => show(&api, ctx, &id, format).await,
        CampaignsAction::Start {
            template,
            file,
            account,
        } => start(&api, ctx, &template, &file, account.as_deref()).await,
        CampaignsAction::Delete { id, yes } => delete(&api, ctx, &id, yes).await,
    };

    result.map_err(|e| console.report(e))
}

fn styled_status(status: &str) -> String {
    match status {
        "completed" => style(status).green().to_string(),
        "running" | "in_progress" => style(status).yellow().to_string(),
        "failed" => style(status).red().to_string(),
        _ => status.to_string(),
    }
}

async fn list(api: &CampaignsApi, ctx: &UiContext, format: OutputFormat) -> DeskResult<()> {
    let campaigns = api.list().await?;

    match format {
        OutputFormat::Json => print_json(&campaigns)?,
        OutputFormat::Plain => {
            for campaign in &campaigns {
                println!("{}", campaign.campaign_id);
            }
        }
        OutputFormat::Table => {
            if campaigns.is_empty() {
                ui::step_info(ctx, "No campaigns yet");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = campaigns.iter().map(campaign_row).collect();
            ui::table(ctx, &["ID", "STATUS", "SENT", "FAILED", "TOTAL", "STARTED"], &rows);
            println!();
            println!("{} campaign(s)", campaigns.len());
        }
    }

    Ok(())
}

fn campaign_row(campaign: &CampaignStatus) -> Vec<String> {
    vec![
        campaign.campaign_id.clone(),
        styled_status(&campaign.status),
        campaign.sent_messages.to_string(),
        campaign.failed_messages.to_string(),
        campaign.total_messages.to_string(),
        format_time(Some(campaign.start_time)),
    ]
}

async fn show(api: &CampaignsApi, ctx: &UiContext, id: &str, format: OutputFormat) -> DeskResult<()> {
    let campaign = api.get(id).await?;

    match format {
        OutputFormat::Json => print_json(&campaign)?,
        OutputFormat::Plain => println!("{}", campaign.status),
        OutputFormat::Table => {
            ui::key_value(ctx, "Campaign", &campaign.campaign_id);
            ui::key_value(ctx, "Status", &styled_status(&campaign.status));
            ui::key_value(
                ctx,
                "Messages",
                &format!(
                    "{} sent, {} failed, {} pending of {}",
                    campaign.sent_messages,
                    campaign.failed_messages,
                    campaign.pending_messages(),
                    campaign.total_messages
                ),
            );
            ui::key_value(ctx, "Started", &format_time(Some(campaign.start_time)));
            ui::key_value(ctx, "Finished", &format_time(campaign.end_time));

            if !campaign.errors.is_empty() {
                ui::section(ctx, "Errors");
                for error in &campaign.errors {
                    let line = error
                        .iter()
                        .map(|(k, v)| format!("{}: {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ");
                    ui::remark(ctx, &line);
                }
            }
        }
    }

    Ok(())
}

async fn start(
    api: &CampaignsApi,
    ctx: &UiContext,
    template: &str,
    file: &Path,
    account: Option<&str>,
) -> DeskResult<()> {
    let label = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let progress = UploadProgress::new(ctx, &label);
    let result = api
        .start(template, file, account, Some(progress.callback()))
        .await;
    progress.finish();
    let launch = result?;

    ui::step_ok(ctx, &format!("Campaign {} started", launch.campaign_id));
    ui::key_value(ctx, "Recipients", &launch.total_recipients.to_string());
    if !launch.errors.is_empty() {
        ui::step_warn(ctx, &format!("{} row(s) skipped", launch.errors.len()));
        for error in &launch.errors {
            ui::remark(ctx, error);
        }
    }
    ui::remark(
        ctx,
        &format!("Follow it with: dmdesk campaigns show {}", launch.campaign_id),
    );
    Ok(())
}

async fn delete(api: &CampaignsApi, ctx: &UiContext, id: &str, yes: bool) -> DeskResult<()> {
    if !confirm_delete(ctx, &format!("campaign {}", id), yes).await? {
        ui::remark(ctx, "Cancelled");
        return Ok(());
    }

    let response = api.delete(id).await?;
    ui::step_ok(ctx, &response.message);
    Ok(())
}
