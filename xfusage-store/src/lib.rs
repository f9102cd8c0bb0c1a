// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # xfusage Store
//!
//! Configuration for the xfusage host: display name, portal credentials,
//! scan interval and request timeout, persisted as JSON.
//!
//! ```ignore
//! use xfusage_store::Config;
//!
//! let config = Config::load()?.with_overrides(None, None);
//! config.validate()?;
//! let credentials = config.credentials()?;
//! ```

pub mod config;
pub mod error;

pub use config::{Config, default_config_dir, default_config_path};
pub use error::StoreError;
