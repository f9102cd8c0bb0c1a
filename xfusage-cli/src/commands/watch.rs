//! Watch command - periodic updates on the scan interval.

use std::io::{Write, stdout};

use anyhow::Result;
use clap::Args;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::info;
use xfusage_core::SensorEntity;

use super::fetch::print_report;
use super::{build_sensor, load_config};
use crate::output::SensorReport;
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds (defaults to the configured scan interval).
    #[arg(long, short)]
    pub interval: Option<u64>,

    /// Minimum interval to use.
    #[arg(long, default_value = "60")]
    pub min_interval: u64,
}

impl WatchArgs {
    /// Resolves the effective interval in seconds.
    fn effective_interval(&self, configured: u64) -> u64 {
        self.interval.unwrap_or(configured).max(self.min_interval)
    }
}

/// Runs the watch command.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let mut sensor = build_sensor(&config)?;

    let refresh_interval = args.effective_interval(config.scan_interval().as_secs());
    info!(interval = refresh_interval, "Starting watch mode");

    let mut ticker = interval(Duration::from_secs(refresh_interval));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sensor.update().await;
                let report = SensorReport::from_sensor(&sensor);

                if cli.format == OutputFormat::Text {
                    if clears_screen(cli) {
                        print!("\x1b[2J\x1b[H");
                        stdout().flush()?;
                    }
                    let now = chrono::Local::now();
                    println!(
                        "xfusage watch - {} (refresh: {}s)",
                        now.format("%H:%M:%S"),
                        refresh_interval
                    );
                    println!("{}", "─".repeat(50));
                    println!();
                }

                print_report(&report, cli)?;

                if cli.format == OutputFormat::Text {
                    println!();
                    println!("Press Ctrl+C to exit");
                }
            }
            _ = &mut shutdown => {
                info!(sensor = %sensor.name(), "Stopping watch mode");
                return Ok(ExitCode::Success);
            }
        }
    }
}

/// Whether to clear the terminal before each text refresh.
fn clears_screen(cli: &Cli) -> bool {
    !cli.no_color
}
