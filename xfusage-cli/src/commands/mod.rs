//! CLI command implementations.

pub mod config;
pub mod fetch;
pub mod watch;

use anyhow::Result;
use tracing::debug;
use xfusage_core::UsageSensor;
use xfusage_fetch::{PortalEndpoints, XfinityUsageFetcher};
use xfusage_store::Config;

use crate::Cli;

/// The sensor type every command drives.
pub type XfinitySensor = UsageSensor<XfinityUsageFetcher>;

/// Loads the config file and applies command-line/environment overrides.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config.with_overrides(cli.username.clone(), cli.password.clone()))
}

/// Validates the configuration and builds the sensor over a fresh session.
pub fn build_sensor(config: &Config) -> Result<XfinitySensor> {
    config.validate()?;

    let fetcher = XfinityUsageFetcher::with_endpoints(
        config.credentials()?,
        PortalEndpoints::default(),
        config.request_timeout(),
    )?;
    debug!(name = %config.name, user = %fetcher.username(), "Built sensor");

    Ok(UsageSensor::new(config.name.clone(), fetcher))
}
