//! CLI argument definitions using clap derive

use clap::{ArgAction, ArgGroup, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dmdesk - admin console for the Instagram DM automation backend
///
/// Keeps an operator session on disk and manages accounts, message
/// templates and campaigns through the backend API.
#[derive(Parser, Debug)]
#[command(name = "dmdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DMDESK_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in to the backend
    Login(LoginArgs),

    /// End the current session
    Logout,

    /// Show the logged-in operator
    Whoami(FormatArgs),

    /// Edit the current session
    Session(SessionArgs),

    /// Manage Instagram accounts
    Accounts(AccountsArgs),

    /// Manage message templates
    Templates(TemplatesArgs),

    /// Inspect DM campaigns
    Campaigns(CampaignsArgs),

    /// Show aggregate statistics
    Dashboard(FormatArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the login command
#[derive(Parser, Debug)]
pub struct LoginArgs {
    /// Operator username (prompted when omitted)
    #[arg(short, long)]
    pub username: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,

    /// Password (prefer the prompt or --password-stdin)
    #[arg(long, env = "DMDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Location to land on instead of the configured landing page
    #[arg(long)]
    pub redirect: Option<String>,
}

/// Shared `--format` flag
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the session command
#[derive(Parser, Debug)]
pub struct SessionArgs {
    #[command(subcommand)]
    pub action: SessionAction,
}

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionAction {
    /// Change fields of the current session
    #[command(group(ArgGroup::new("fields").required(true).multiple(true).args(["role", "username"])))]
    Set {
        /// New role
        #[arg(long)]
        role: Option<String>,

        /// New display username
        #[arg(long)]
        username: Option<String>,
    },
}

/// Arguments for the accounts command
#[derive(Parser, Debug)]
pub struct AccountsArgs {
    #[command(subcommand)]
    pub action: AccountsAction,
}

/// Account subcommands
#[derive(Subcommand, Debug)]
pub enum AccountsAction {
    /// List accounts
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one account
    Show {
        username: String,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Add an account
    Add {
        username: String,

        /// Read the account password from the first line of stdin
        #[arg(long)]
        password_stdin: bool,
    },

    /// Bulk-add accounts from a CSV file with username and password columns
    Upload { file: PathBuf },

    /// Delete an account
    Delete {
        username: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Log an account in on the backend
    Login { username: String },

    /// Log an account out on the backend
    Logout { username: String },

    /// Configure automatic replies to incoming DMs
    #[command(group(ArgGroup::new("mode").required(true).args(["template", "off"])))]
    AutoReply {
        username: String,

        /// Reply with this template
        #[arg(long)]
        template: Option<String>,

        /// Only reply when a message matches, e.g. --when contains=price (repeatable)
        #[arg(
            long = "when",
            value_name = "KEY=VALUE",
            value_parser = parse_key_value,
            requires = "template"
        )]
        conditions: Vec<(String, String)>,

        /// Turn auto-reply off
        #[arg(long)]
        off: bool,
    },
}

/// Arguments for the templates command
#[derive(Parser, Debug)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub action: TemplatesAction,
}

/// Template subcommands
#[derive(Subcommand, Debug)]
pub enum TemplatesAction {
    /// List templates
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one template
    Show {
        id: String,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a template
    Add {
        name: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Replace a template's name and content
    Update {
        id: String,

        #[arg(long)]
        name: String,

        #[command(flatten)]
        content: ContentArgs,
    },

    /// Delete a template
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Render a template with sample values
    Preview {
        id: String,

        /// Sample value, e.g. --set name=Alice (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
        values: Vec<(String, String)>,

        /// Render locally instead of asking the backend
        #[arg(long)]
        local: bool,
    },

    /// Generate template drafts
    Generate {
        /// Kind of business, e.g. "coffee shop"
        #[arg(long)]
        business_type: String,

        /// What the message is for, e.g. welcome or promotion
        #[arg(long)]
        purpose: String,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

/// Template body, given inline or read from a file
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ContentArgs {
    /// Template text with {placeholders}
    #[arg(long)]
    pub content: Option<String>,

    /// Read the template text from a file
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Arguments for the campaigns command
#[derive(Parser, Debug)]
pub struct CampaignsArgs {
    #[command(subcommand)]
    pub action: CampaignsAction,
}

/// Campaign subcommands
#[derive(Subcommand, Debug)]
pub enum CampaignsAction {
    /// List campaigns
    List {
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show one campaign
    Show {
        id: String,

        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Send a template to every recipient in a CSV with username and name columns
    Start {
        /// Template to send
        #[arg(long)]
        template: String,

        /// Recipient list
        file: PathBuf,

        /// Account to send from (the backend picks one when omitted)
        #[arg(long)]
        account: Option<String>,
    },

    /// Delete a campaign record
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}
