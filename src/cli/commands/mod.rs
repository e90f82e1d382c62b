//! CLI command implementations

pub mod accounts;
pub mod campaigns;
pub mod config;
pub mod dashboard;
pub mod login;
pub mod logout;
pub mod session;
pub mod templates;
pub mod whoami;

pub use accounts::execute as accounts;
pub use campaigns::execute as campaigns;
pub use config::execute as config;
pub use dashboard::execute as dashboard;
pub use login::execute as login;
pub use logout::execute as logout;
pub use session::execute as session;
pub use templates::execute as templates;
pub use whoami::execute as whoami;

use crate::error::{DeskError, DeskResult};
use chrono::NaiveDateTime;
use serde::Serialize;

/// Read one line from stdin, without the trailing newline
pub(crate) async fn read_stdin_line(what: &str) -> DeskResult<String> {
    let line = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| line)
    })
    .await
    .map_err(|e| DeskError::Internal(format!("stdin task failed: {}", e)))?
    .map_err(|e| DeskError::io("reading stdin", e))?;

    let line = line.trim_end_matches(['\r', '\n']).to_string();
    if line.is_empty() {
        return Err(DeskError::User(format!("no {} on stdin", what)));
    }
    Ok(line)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> DeskResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn format_time(time: Option<NaiveDateTime>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Ask before deleting. Non-interactive runs must pass `--yes`.
pub(crate) async fn confirm_delete(
    ctx: &crate::ui::UiContext,
    what: &str,
    yes: bool,
) -> DeskResult<bool> {
    if yes {
        return Ok(true);
    }
    if !ctx.is_interactive() {
        return Err(DeskError::User(format!(
            "refusing to delete {} without confirmation (pass --yes)",
            what
        )));
    }
    crate::ui::confirm(ctx, &format!("Delete {}?", what), false).await
}
