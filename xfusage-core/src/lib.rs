// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # xfusage Core
//!
//! Core types, models, and traits shared by the xfusage crates.
//!
//! ## Key Types
//!
//! - [`Credentials`] - Portal username and password
//! - [`UsageSnapshot`] - Last successfully fetched usage figures
//! - [`UsageSource`] - Anything that can refresh and hold a snapshot
//! - [`SensorEntity`] - Read-only surface handed to a host platform
//! - [`UsageSensor`] - Adapter turning a [`UsageSource`] into a [`SensorEntity`]

pub mod error;
pub mod models;
pub mod sensor;
pub mod traits;

pub use error::CoreError;
pub use models::{Credentials, UsageSnapshot};
pub use sensor::{
    ATTR_ALLOWED_USAGE, ATTR_ATTRIBUTION, ATTR_REMAINING_USAGE, ATTR_TOTAL_USAGE,
    DEFAULT_ATTRIBUTION, DEFAULT_NAME, UsageSensor,
};
pub use traits::{SensorEntity, UsageSource};
