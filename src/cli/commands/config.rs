//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{DeskError, DeskResult};
use crate::ui::{self, UiContext};

/// Keys accepted by `config set`
const VALID_KEYS: &[&str] = &[
    "general.log_format",
    "general.audit_log",
    "api.base_url",
    "api.login_path",
    "api.timeout_secs",
    "api.user_agent",
    "navigation.landing",
    "navigation.login",
];

/// Execute the config command
pub async fn execute(args: ConfigArgs, manager: &ConfigManager, config: &Config) -> DeskResult<()> {
    let ctx = UiContext::detect();

    match args.action {
        None | Some(ConfigAction::Show) => show_config(config)?,
        Some(ConfigAction::Path) => println!("{}", manager.path().display()),
        Some(ConfigAction::Init { force }) => init_config(&ctx, manager, force).await?,
        Some(ConfigAction::Set { key, value }) => {
            // Start from the file, not the env-overridden config
            let mut stored = if manager.path().exists() {
                manager.load_from_file(manager.path()).await?
            } else {
                Config::default()
            };
            set_value(&mut stored, &key, &value)?;
            manager.save(&stored).await?;
            ui::step_ok(&ctx, &format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}

fn show_config(config: &Config) -> DeskResult<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn init_config(ctx: &UiContext, manager: &ConfigManager, force: bool) -> DeskResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        ui::step_warn_hint(
            ctx,
            &format!("Config already exists at {}", path.display()),
            "Use --force to overwrite",
        );
        return Ok(());
    }

    manager.save(&Config::default()).await?;
    ui::step_ok(ctx, &format!("Configuration initialized at {}", path.display()));
    Ok(())
}

/// Apply a dot-separated key to the config
pub(crate) fn set_value(config: &mut Config, key: &str, value: &str) -> DeskResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "log_format"] => match value {
            "text" | "json" => config.general.log_format = value.to_string(),
            _ => {
                return Err(DeskError::User(format!(
                    "Invalid log format: {}. Use text or json",
                    value
                )))
            }
        },
        ["general", "audit_log"] => config.general.audit_log = parse_bool(value)?,

        ["api", "base_url"] => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(DeskError::InvalidBaseUrl(value.to_string()));
            }
            config.api.base_url = value.to_string();
        }
        ["api", "login_path"] => config.api.login_path = location(value)?,
        ["api", "timeout_secs"] => config.api.timeout_secs = parse_secs(value)?,
        ["api", "user_agent"] => config.api.user_agent = value.to_string(),

        ["navigation", "landing"] => config.navigation.landing = location(value)?,
        ["navigation", "login"] => config.navigation.login = location(value)?,

        _ => {
            return Err(DeskError::User(format!(
                "Unknown config key: {}. Valid keys: {}",
                key,
                VALID_KEYS.join(", ")
            )))
        }
    }

    Ok(())
}

fn location(value: &str) -> DeskResult<String> {
    if value.starts_with('/') {
        Ok(value.to_string())
    } else {
        Err(DeskError::User(format!("Expected a path starting with '/': {}", value)))
    }
}

fn parse_bool(value: &str) -> DeskResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(DeskError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_secs(value: &str) -> DeskResult<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(DeskError::User(format!("Invalid timeout: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_known_keys() {
        let mut config = Config::default();
        set_value(&mut config, "api.base_url", "https://dm.example.com").unwrap();
        set_value(&mut config, "api.timeout_secs", "5").unwrap();
        set_value(&mut config, "general.audit_log", "no").unwrap();
        set_value(&mut config, "navigation.landing", "/accounts").unwrap();

        assert_eq!(config.api.base_url, "https://dm.example.com");
        assert_eq!(config.api.timeout_secs, 5);
        assert!(!config.general.audit_log);
        assert_eq!(config.navigation.landing, "/accounts");
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::default();
        assert!(set_value(&mut config, "api.base_url", "dm.example.com").is_err());
        assert!(set_value(&mut config, "api.timeout_secs", "0").is_err());
        assert!(set_value(&mut config, "general.log_format", "xml").is_err());
        assert!(set_value(&mut config, "navigation.login", "login").is_err());
    }

    #[test]
    fn rejects_unknown_key() {
        let mut config = Config::default();
        let err = set_value(&mut config, "vm.name", "x").unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }
}
