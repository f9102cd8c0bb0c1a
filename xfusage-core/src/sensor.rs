//! Usage sensor adapter.
//!
//! [`UsageSensor`] wraps a [`UsageSource`] and presents its latest snapshot
//! as a [`SensorEntity`]: the state is the total usage, and the attributes
//! carry the full breakdown.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::models::UsageSnapshot;
use crate::traits::{SensorEntity, UsageSource};

/// Default display name.
pub const DEFAULT_NAME: &str = "Xfinity Usage";

/// Attribution string reported with every snapshot.
pub const DEFAULT_ATTRIBUTION: &str = "Powered by Xfinity";

/// Attribute key for the attribution string.
pub const ATTR_ATTRIBUTION: &str = "attribution";

/// Attribute key for total usage.
pub const ATTR_TOTAL_USAGE: &str = "total_usage";

/// Attribute key for allowed usage.
pub const ATTR_ALLOWED_USAGE: &str = "allowed_usage";

/// Attribute key for remaining usage.
pub const ATTR_REMAINING_USAGE: &str = "remaining_usage";

/// Sensor exposing the latest usage snapshot of a source.
#[derive(Debug)]
pub struct UsageSensor<S> {
    name: String,
    source: S,
}

impl<S: UsageSource> UsageSensor<S> {
    /// Creates a sensor with the given name over `source`.
    pub fn new(name: impl Into<String>, source: S) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the snapshot backing the current state.
    pub fn snapshot(&self) -> Option<&UsageSnapshot> {
        self.source.snapshot()
    }
}

impl<S: UsageSource> SensorEntity for UsageSensor<S> {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> Option<f64> {
        self.source.snapshot().map(|s| s.total_usage)
    }

    fn attributes(&self) -> Option<BTreeMap<String, Value>> {
        let snapshot = self.source.snapshot()?;

        let mut attrs = BTreeMap::new();
        attrs.insert(
            ATTR_ATTRIBUTION.to_string(),
            Value::from(DEFAULT_ATTRIBUTION),
        );
        attrs.insert(ATTR_TOTAL_USAGE.to_string(), Value::from(snapshot.total_usage));
        attrs.insert(
            ATTR_ALLOWED_USAGE.to_string(),
            Value::from(snapshot.allowed_usage),
        );
        attrs.insert(
            ATTR_REMAINING_USAGE.to_string(),
            Value::from(snapshot.remaining_usage),
        );
        Some(attrs)
    }

    fn unit_of_measurement(&self) -> Option<&str> {
        self.source.snapshot().map(|s| s.unit.as_str())
    }

    async fn update(&mut self) {
        debug!(sensor = %self.name, "Updating sensor");
        self.source.refresh().await;
    }
}

// ============================================================================
// Tests
// ============================================================================
