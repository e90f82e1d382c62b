//! dmdesk - Instagram DM automation admin console
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use dmdesk::app::Console;
use dmdesk::cli::{commands, Cli, Commands};
use dmdesk::config::ConfigManager;
use dmdesk::error::DeskResult;
use dmdesk::ui::{self, UiContext};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        // Already shown as a notification
        Err(e) if e.is_reported() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, format: &str) {
    // 0 = warn, 1 = info, 2+ = debug
    let filter = match verbose {
        0 => EnvFilter::new("dmdesk=warn"),
        1 => EnvFilter::new("dmdesk=info"),
        _ => EnvFilter::new("dmdesk=debug"),
    };

    if format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn run() -> DeskResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config.general.log_format);
    debug!("Using config {}", config_manager.path().display());

    // Config command doesn't need a session
    if let Commands::Config(args) = cli.command {
        return commands::config(args, &config_manager, &config).await;
    }

    let ctx = UiContext::detect();
    if ctx.use_fancy_output() {
        ui::init_theme();
    }

    let console = Console::open(config, ctx).await?;

    match cli.command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::Login(args) => commands::login(args, &console).await,
        Commands::Logout => commands::logout(&console).await,
        Commands::Whoami(args) => commands::whoami(args, &console).await,
        Commands::Session(args) => commands::session(args, &console).await,
        Commands::Accounts(args) => commands::accounts(args, &console).await,
        Commands::Templates(args) => commands::templates(args, &console).await,
        Commands::Campaigns(args) => commands::campaigns(args, &console).await,
        Commands::Dashboard(args) => commands::dashboard(args, &console).await,
    }
}
