//! Trait definitions for xfusage.
//!
//! [`UsageSource`] is the seam between the sensor and whatever fetches the
//! data; [`SensorEntity`] is the read-only surface handed to the host.

use std::collections::BTreeMap;
use std::future::Future;

use crate::models::UsageSnapshot;

/// Something that can refresh and hold a usage snapshot.
///
/// Implementors keep the last successful snapshot across failed refreshes.
pub trait UsageSource: Send {
    /// Attempts one refresh. Failures are logged, never returned; the stored
    /// snapshot is only replaced on success.
    fn refresh(&mut self) -> impl Future<Output = ()> + Send;

    /// Returns the last successful snapshot, if any.
    fn snapshot(&self) -> Option<&UsageSnapshot>;
}

/// Read-only entity exposed to a host monitoring platform.
pub trait SensorEntity: Send {
    /// Display name.
    fn name(&self) -> &str;

    /// Current state, `None` while unset.
    fn state(&self) -> Option<f64>;

    /// Extra state attributes, `None` while unset.
    fn attributes(&self) -> Option<BTreeMap<String, serde_json::Value>>;

    /// Unit of measurement, `None` while unset.
    fn unit_of_measurement(&self) -> Option<&str>;

    /// Fetches new state data. Invoked on the host's schedule.
    fn update(&mut self) -> impl Future<Output = ()> + Send;
}
