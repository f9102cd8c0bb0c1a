//! Domain models for xfusage.
//!
//! - [`credentials`] - Portal login credentials
//! - [`usage`] - Usage snapshot

mod credentials;
mod usage;

pub use credentials::Credentials;
pub use usage::UsageSnapshot;
