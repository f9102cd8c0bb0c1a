//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use xfusage_store::{Config, default_config_path};

use super::load_config;
use crate::output::JsonFormatter;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (password redacted).
    Show,

    /// Show the configuration file path.
    Path,

    /// Write a config file from defaults and the supplied credentials.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Config as displayed to the user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigView<'a> {
    name: &'a str,
    username: &'a str,
    password_set: bool,
    scan_interval_secs: u64,
    request_timeout_secs: u64,
}

impl<'a> From<&'a Config> for ConfigView<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            name: &config.name,
            username: &config.username,
            password_set: !config.password.is_empty(),
            scan_interval_secs: config.scan_interval_secs,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(cli)?,
        ConfigAction::Path => show_path(cli)?,
        ConfigAction::Init { force } => init_config(*force, cli)?,
    }
    Ok(ExitCode::Success)
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let view = ConfigView::from(&config);

    match cli.format {
        OutputFormat::Text => {
            println!("xfusage Configuration");
            println!("{}", "─".repeat(40));
            println!("Name:            {}", view.name);
            println!(
                "Username:        {}",
                if view.username.is_empty() { "(not set)" } else { view.username }
            );
            println!(
                "Password:        {}",
                if view.password_set { "(set)" } else { "(not set)" }
            );
            println!("Scan interval:   {}s", view.scan_interval_secs);
            println!("Request timeout: {}s", view.request_timeout_secs);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&view)?);
        }
    }
    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    match cli.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!(
                "{}",
                formatter.format(&serde_json::json!({ "config": path.display().to_string() }))?
            );
        }
    }
    Ok(())
}

fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = Config::default().with_overrides(cli.username.clone(), cli.password.clone());
    config.save_to(&path)?;

    if !cli.quiet {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
