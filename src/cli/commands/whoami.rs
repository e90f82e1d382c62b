//! Whoami command - show the logged-in operator

use super::print_json;
use crate::app::Console;
use crate::cli::args::{FormatArgs, OutputFormat};
use crate::error::{DeskError, DeskResult};
use crate::ui;

/// Execute the whoami command
pub async fn execute(args: FormatArgs, console: &Console) -> DeskResult<()> {
    let session = console
        .session()
        .current_session()
        .await
        .ok_or(DeskError::NotAuthenticated)?;

    match args.format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "id": session.user_id,
            "username": session.username,
            "role": session.role,
            "api": console.client().base_url(),
        }))?,
        OutputFormat::Plain => println!("{}", session.username),
        OutputFormat::Table => {
            let ctx = console.ui();
            ui::key_value(ctx, "Username", &session.username);
            ui::key_value(ctx, "Role", &session.role);
            ui::key_value(ctx, "User ID", &session.user_id);
            ui::key_value(ctx, "API", console.client().base_url());
        }
    }

    Ok(())
}
