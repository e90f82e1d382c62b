//! Login command - authenticate the operator

use super::read_stdin_line;
use crate::app::Console;
use crate::cli::args::LoginArgs;
use crate::error::{DeskError, DeskResult};
use crate::ui;

/// Execute the login command
pub async fn execute(args: LoginArgs, console: &Console) -> DeskResult<()> {
    let ctx = console.ui();

    let username = match args.username {
        Some(username) => username,
        None => ui::input(ctx, "Username", "--username").await?,
    };

    let password = if args.password_stdin {
        read_stdin_line("password").await?
    } else if let Some(password) = args.password {
        password
    } else {
        ui::password(ctx, "Password").await?
    };

    let redirect = args.redirect.or_else(|| console.router().take_origin());

    if !console
        .session()
        .login_with_redirect(&username, &password, redirect.as_deref())
        .await
    {
        return Err(DeskError::Reported);
    }

    console.show_next_step();
    Ok(())
}
