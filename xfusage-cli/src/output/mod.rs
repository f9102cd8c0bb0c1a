//! Output formatting for CLI.

mod json;
mod text;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use xfusage_core::{SensorEntity, UsageSnapshot, UsageSource};

use crate::commands::XfinitySensor;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Everything the host would show for one sensor after an update.
///
/// `state`, `unitOfMeasurement` and `attributes` serialize as `null` while
/// unset.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReport {
    pub name: String,
    pub state: Option<f64>,
    pub unit_of_measurement: Option<String>,
    pub attributes: Option<BTreeMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_attempt: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(skip)]
    pub snapshot: Option<UsageSnapshot>,
}

impl SensorReport {
    /// Builds a report from the live sensor.
    pub fn from_sensor(sensor: &XfinitySensor) -> Self {
        let source = sensor.source();
        Self::from_parts(sensor, source.last_attempt(), source.last_error())
    }

    /// Builds a report from any sensor over any source.
    pub fn from_parts<S: UsageSource>(
        sensor: &xfusage_core::UsageSensor<S>,
        last_attempt: Option<DateTime<Utc>>,
        last_error: Option<&str>,
    ) -> Self {
        let snapshot = sensor.snapshot().cloned();
        Self {
            name: sensor.name().to_string(),
            state: sensor.state(),
            unit_of_measurement: sensor.unit_of_measurement().map(str::to_string),
            attributes: sensor.attributes(),
            start_date: snapshot.as_ref().and_then(|s| s.start_date.clone()),
            end_date: snapshot.as_ref().and_then(|s| s.end_date.clone()),
            updated_at: snapshot.as_ref().map(|s| s.updated_at),
            last_attempt,
            last_error: last_error.map(str::to_string),
            snapshot,
        }
    }
}
