//! Session command - edit the current session record

use crate::app::Console;
use crate::cli::args::{SessionAction, SessionArgs};
use crate::error::{DeskError, DeskResult};
use crate::session::SessionPatch;
use crate::ui;

/// Execute the session command
pub async fn execute(args: SessionArgs, console: &Console) -> DeskResult<()> {
    match args.action {
        SessionAction::Set { role, username } => {
            console.session().require_session().await?;

            let patch = SessionPatch {
                role,
                username,
                ..SessionPatch::default()
            };
            if !console.session().update_session(patch).await {
                return Err(DeskError::Reported);
            }

            if let Some(session) = console.session().current_session().await {
                ui::step_ok(
                    console.ui(),
                    &format!("Session updated: {} ({})", session.username, session.role),
                );
            }
        }
    }

    Ok(())
}
