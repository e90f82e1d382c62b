//! Logout command

use crate::app::Console;
use crate::error::DeskResult;
use crate::ui;

/// Execute the logout command
pub async fn execute(console: &Console) -> DeskResult<()> {
    if !console.session().is_authenticated().await {
        ui::remark(console.ui(), "No active session");
    }

    console.session().logout().await;
    Ok(())
}
