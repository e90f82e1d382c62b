//! Dashboard command - aggregate statistics

use super::print_json;
use crate::app::Console;
use crate::cli::args::{FormatArgs, OutputFormat};
use crate::dashboard::DashboardStats;
use crate::error::DeskResult;
use crate::ui::{self, TaskSpinner};

/// Execute the dashboard command
pub async fn execute(args: FormatArgs, console: &Console) -> DeskResult<()> {
    let session = console.require("/dashboard").await?;
    let ctx = console.ui();

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start("Loading statistics...");
    let stats = match DashboardStats::fetch(console.client()).await {
        Ok(stats) => {
            spinner.clear();
            stats
        }
        Err(e) => {
            spinner.clear();
            return Err(console.report(e));
        }
    };

    match args.format {
        OutputFormat::Json | OutputFormat::Plain => print_json(&stats)?,
        OutputFormat::Table => {
            ui::intro(ctx, &format!("Dashboard ({})", session.username));

            ui::section(ctx, "Accounts");
            ui::key_value(ctx, "Total", &stats.total_accounts.to_string());
            ui::key_value(ctx, "Active", &stats.active_accounts.to_string());
            for (status, count) in &stats.accounts_by_status {
                ui::key_value(ctx, &format!("Login {}", status), &count.to_string());
            }

            ui::section(ctx, "Templates");
            ui::key_value(ctx, "Total", &stats.total_templates.to_string());

            ui::section(ctx, "Campaigns");
            ui::key_value(ctx, "Total", &stats.total_campaigns.to_string());
            for (status, count) in &stats.campaigns_by_status {
                ui::key_value(ctx, status, &count.to_string());
            }
            ui::key_value(ctx, "Messages sent", &stats.messages_sent.to_string());
            ui::key_value(ctx, "Messages failed", &stats.messages_failed.to_string());
            match stats.success_rate {
                Some(rate) => {
                    ui::key_value_status(ctx, "Success rate", &format!("{:.1}%", rate), rate >= 90.0)
                }
                None => ui::key_value(ctx, "Success rate", "-"),
            }
        }
    }

    Ok(())
}
