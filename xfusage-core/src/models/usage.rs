//! Usage snapshot types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ============================================================================
// Usage Snapshot
// ============================================================================

/// The last successfully fetched usage figures for one billing month.
///
/// A snapshot is always complete: the four usage fields are set together.
/// Absence of data is modelled as `Option<UsageSnapshot>` by the holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Data used so far this month.
    pub total_usage: f64,
    /// Monthly allowance.
    pub allowed_usage: f64,
    /// Allowance minus usage. Negative once the allowance is exceeded.
    pub remaining_usage: f64,
    /// Unit of measure reported by the portal (e.g. "GB").
    pub unit: String,
    /// First day of the billing month, as reported by the portal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Last day of the billing month, as reported by the portal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// When this snapshot was fetched.
    pub updated_at: DateTime<Utc>,
}

impl UsageSnapshot {
    /// Creates a snapshot from total and allowed usage.
    ///
    /// Remaining usage is derived as `allowed - total` and is not clamped.
    pub fn new(total_usage: f64, allowed_usage: f64, unit: impl Into<String>) -> Self {
        Self {
            total_usage,
            allowed_usage,
            remaining_usage: allowed_usage - total_usage,
            unit: unit.into(),
            start_date: None,
            end_date: None,
            updated_at: Utc::now(),
        }
    }

    /// Sets the billing period bounds.
    pub fn with_period(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Returns true if this snapshot is older than `threshold`.
    pub fn is_stale(&self, threshold: Duration) -> bool {
        Utc::now() - self.updated_at > threshold
    }

    /// Returns true if usage exceeds the allowance.
    pub fn is_over_limit(&self) -> bool {
        self.remaining_usage < 0.0
    }

    /// Returns the percentage of the allowance used, if the allowance is positive.
    pub fn used_percent(&self) -> Option<f64> {
        (self.allowed_usage > 0.0).then(|| self.total_usage / self.allowed_usage * 100.0)
    }

    /// Validates the snapshot data.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidData` if a figure is non-finite.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.total_usage.is_finite() {
            return Err(CoreError::InvalidData(format!(
                "total usage is not finite: {}",
                self.total_usage
            )));
        }
        if !self.allowed_usage.is_finite() {
            return Err(CoreError::InvalidData(format!(
                "allowed usage is not finite: {}",
                self.allowed_usage
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
