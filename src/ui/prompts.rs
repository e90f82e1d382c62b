//! Interactive prompts with non-interactive fallback

use super::context::UiContext;
use crate::error::{DeskError, DeskResult};

/// Prompt for confirmation, returns default if non-interactive or auto-yes
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> DeskResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on the terminal
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| DeskError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| DeskError::User(format!("Prompt failed: {}", e)))
}

/// Prompt for a line of text. Fails when there is nobody to ask.
pub async fn input(ctx: &UiContext, message: &str, flag: &str) -> DeskResult<String> {
    if !ctx.is_interactive() {
        return Err(DeskError::User(format!(
            "{} is required when not running interactively (pass {})",
            message, flag
        )));
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .validate(|value: &String| {
                if value.trim().is_empty() {
                    Err("Value cannot be empty")
                } else {
                    Ok(())
                }
            })
            .interact::<String>()
    })
    .await
    .map_err(|e| DeskError::User(format!("Prompt task failed: {}", e)))?;

    result
        .map(|value| value.trim().to_string())
        .map_err(|e| DeskError::User(format!("Prompt failed: {}", e)))
}

/// Prompt for a secret without echoing it
pub async fn password(ctx: &UiContext, message: &str) -> DeskResult<String> {
    if !ctx.is_interactive() {
        return Err(DeskError::User(
            "password is required when not running interactively (use --password-stdin or DMDESK_PASSWORD)"
                .to_string(),
        ));
    }

    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::password(&message).interact()
    })
    .await
    .map_err(|e| DeskError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| DeskError::User(format!("Prompt failed: {}", e)))
}
