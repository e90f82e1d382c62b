//! Accounts command - list, add, upload and delete Instagram accounts, set auto-reply

use super::{confirm_delete, format_time, print_json, read_stdin_line};
use crate::api::models::{ApiResponse, AutoReplyConfig, InstagramAccount};
use crate::api::AccountsApi;
use crate::app::Console;
use crate::cli::args::{AccountsAction, AccountsArgs, OutputFormat};
use crate::error::DeskResult;
use crate::ui::{self, TaskSpinner, UiContext, UploadProgress};
use std::path::Path;

/// Execute the accounts command
pub async fn execute(args: AccountsArgs, console: &Console) -> DeskResult<()> {
    console.require("/accounts").await?;

    let api = console.accounts();
    let ctx = console.ui();

    let result = match args.action {
        AccountsAction::List { format } => list(&api, ctx, format).await,
        AccountsAction::Show { username, format } => show(&api, ctx, &username, format).await,
        AccountsAction::Add {
            username,
            password_stdin,
        } => add(&api, ctx, &username, password_stdin).await,
        AccountsAction::Upload { file } => upload(&api, ctx, &file).await,
        AccountsAction::Delete { username, yes } => delete(&api, ctx, &username, yes).await,
        AccountsAction::Login { username } => {
            let response = api.login(&username).await;
            acknowledge(ctx, response)
        }
        AccountsAction::Logout { username } => {
            let response = api.logout(&username).await;
            acknowledge(ctx, response)
        }
        AccountsAction::AutoReply {
            username,
            template,
            conditions,
            off,
        } => {
            let config = match template {
                Some(template) if !off => {
                    AutoReplyConfig::enabled(template, conditions.into_iter().collect())
                }
                _ => AutoReplyConfig::disabled(),
            };
            let response = console
                .campaigns()
                .configure_auto_reply(&username, &config)
                .await;
            acknowledge(ctx, response)
        }
    };

    result.map_err(|e| console.report(e))
}

async fn list(api: &AccountsApi, ctx: &UiContext, format: OutputFormat) -> DeskResult<()> {
    let list = api.list().await?;

    match format {
        OutputFormat::Json => print_json(&list)?,
        OutputFormat::Plain => {
            for account in &list.accounts {
                println!("{}", account.username);
            }
        }
        OutputFormat::Table => {
            if list.accounts.is_empty() {
                ui::step_info(ctx, "No accounts yet");
                ui::remark(ctx, "Add one with: dmdesk accounts add <username>");
                return Ok(());
            }

            let rows: Vec<Vec<String>> = list.accounts.iter().map(account_row).collect();
            ui::table(ctx, &["USERNAME", "ACTIVE", "STATUS", "LAST LOGIN"], &rows);
            println!();
            println!("{} account(s)", list.total);
        }
    }

    Ok(())
}

fn account_row(account: &InstagramAccount) -> Vec<String> {
    vec![
        account.username.clone(),
        if account.is_active { "yes" } else { "no" }.to_string(),
        account.login_status.clone(),
        format_time(account.last_login),
    ]
}

async fn show(
    api: &AccountsApi,
    ctx: &UiContext,
    username: &str,
    format: OutputFormat,
) -> DeskResult<()> {
    let account = api.get(username).await?;

    match format {
        OutputFormat::Json => print_json(&account)?,
        OutputFormat::Plain => println!("{}", account.login_status),
        OutputFormat::Table => {
            ui::key_value(ctx, "Username", &account.username);
            ui::key_value_status(
                ctx,
                "Active",
                if account.is_active { "yes" } else { "no" },
                account.is_active,
            );
            ui::key_value_status(
                ctx,
                "Login status",
                &account.login_status,
                account.login_status == "success",
            );
            ui::key_value(ctx, "Last login", &format_time(account.last_login));
            if let Some(ref error) = account.error_message {
                ui::key_value(ctx, "Last error", error);
            }
        }
    }

    Ok(())
}

async fn add(
    api: &AccountsApi,
    ctx: &UiContext,
    username: &str,
    password_stdin: bool,
) -> DeskResult<()> {
    let password = if password_stdin {
        read_stdin_line("password").await?
    } else {
        ui::password(ctx, &format!("Password for {}", username)).await?
    };

    let response = api.create(username, &password).await?;
    ui::step_ok(ctx, &response.message);
    Ok(())
}

async fn upload(api: &AccountsApi, ctx: &UiContext, file: &Path) -> DeskResult<()> {
    let label = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let progress = UploadProgress::new(ctx, &label);
    let result = api.bulk_upload(file, Some(progress.callback())).await;
    progress.finish();
    let receipt = result?;

    ui::step_ok(ctx, &receipt.message);
    ui::key_value(ctx, "Accounts queued", &receipt.total_accounts.to_string());
    if !receipt.errors.is_empty() {
        ui::step_warn(ctx, &format!("{} row(s) rejected", receipt.errors.len()));
        for error in &receipt.errors {
            ui::remark(ctx, error);
        }
    }
    Ok(())
}

async fn delete(api: &AccountsApi, ctx: &UiContext, username: &str, yes: bool) -> DeskResult<()> {
    if !confirm_delete(ctx, &format!("account {}", username), yes).await? {
        ui::remark(ctx, "Cancelled");
        return Ok(());
    }

    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(&format!("Deleting {}...", username));
    match api.delete(username).await {
        Ok(response) => {
            spinner.stop(&response.message);
            Ok(())
        }
        Err(e) => {
            spinner.clear();
            Err(e)
        }
    }
}

fn acknowledge(ctx: &UiContext, response: DeskResult<ApiResponse>) -> DeskResult<()> {
    let response = response?;
    if response.success {
        ui::step_ok(ctx, &response.message);
    } else {
        ui::step_warn(ctx, &response.message);
    }
    Ok(())
}
