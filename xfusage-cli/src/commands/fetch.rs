//! Fetch command - one update, then print the sensor.

use anyhow::Result;
use xfusage_core::SensorEntity;

use super::{build_sensor, load_config};
use crate::output::{JsonFormatter, SensorReport, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the fetch command.
pub async fn run(cli: &Cli) -> Result<ExitCode> {
    let config = load_config(cli)?;
    let mut sensor = build_sensor(&config)?;

    sensor.update().await;

    let report = SensorReport::from_sensor(&sensor);
    print_report(&report, cli)?;

    if report.state.is_some() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::NoData)
    }
}

/// Prints a report in the selected format.
pub fn print_report(report: &SensorReport, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_report(report));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(report)?);
        }
    }
    Ok(())
}
