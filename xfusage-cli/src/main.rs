// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! xfusage - Xfinity internet usage from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Log in once and print current usage
//! XFINITY_USERNAME=me XFINITY_PASSWORD=secret xfusage
//!
//! # JSON output
//! xfusage --format json --pretty
//!
//! # Poll on the configured scan interval (hourly by default)
//! xfusage watch
//!
//! # Write a config file
//! xfusage --username me --password secret config init
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, fetch, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// xfusage - Xfinity internet usage monitoring.
#[derive(Parser)]
#[command(name = "xfusage")]
#[command(about = "Xfinity internet usage monitoring CLI")]
#[command(long_about = r#"
xfusage logs into the Xfinity customer portal and reports this month's
internet data usage, allowance, and remaining data.

Credentials come from the config file, --username/--password, or the
XFINITY_USERNAME/XFINITY_PASSWORD environment variables.

Examples:
  xfusage                        # Fetch once and print
  xfusage --format json          # JSON output
  xfusage watch                  # Refresh on the scan interval
  xfusage config path            # Where the config file lives
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'fetch' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file path (defaults to the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Portal username, overriding the config file.
    #[arg(long, short = 'u', env = "XFINITY_USERNAME", global = true)]
    pub username: Option<String>,

    /// Portal password, overriding the config file.
    #[arg(long, env = "XFINITY_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch current usage once (default if no command specified).
    #[command(visible_alias = "f")]
    Fetch,

    /// Refresh usage on a fixed interval until interrupted.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// The refresh produced no usage data.
    NoData = 2,
    /// Configuration is missing or invalid.
    Config = 3,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("xfusage=debug,info")
    } else {
        EnvFilter::new("xfusage=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Fetch) | None => fetch::run(&cli).await,
        Some(Commands::Watch(args)) => watch::run(args, &cli).await,
        Some(Commands::Config(args)) => config::run(args, &cli),
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            let code = if e.downcast_ref::<xfusage_store::StoreError>().is_some() {
                ExitCode::Config
            } else {
                ExitCode::Error
            };
            std::process::exit(code as i32);
        }
    }
}
