// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # xfusage Fetch
//!
//! Session handling and scraping for the Xfinity customer portal.
//!
//! - [`client`] - HTTP client with a persistent cookie jar and domain allowlist
//! - [`endpoints`] - Portal URLs and the login form template
//! - [`parser`] - `reqId` token scraping and usage JSON parsing
//! - [`fetcher`] - [`XfinityUsageFetcher`], the login-and-fetch sequence
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//!
//! use xfusage_core::{Credentials, UsageSensor, SensorEntity};
//! use xfusage_fetch::{PortalEndpoints, XfinityUsageFetcher};
//!
//! let fetcher = XfinityUsageFetcher::with_endpoints(
//!     Credentials::new("user", "pass"),
//!     PortalEndpoints::default(),
//!     Duration::from_secs(30),
//! )?;
//! let mut sensor = UsageSensor::new("Xfinity Usage", fetcher);
//! sensor.update().await;
//! println!("{:?} {:?}", sensor.state(), sensor.unit_of_measurement());
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod fetcher;
pub mod parser;

pub use client::HttpClient;
pub use endpoints::PortalEndpoints;
pub use error::{FetchError, HttpError, LoginStep};
pub use fetcher::XfinityUsageFetcher;
pub use parser::{UsageMonth, UsageResponse, extract_req_id, parse_usage_response};
