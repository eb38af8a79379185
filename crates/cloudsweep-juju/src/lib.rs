//! juju platform client for cloudsweep
//!
//! Implements [`cloudsweep_core::PlatformClient`] by running the juju CLI.
//!
//! # Requirements
//!
//! - the `juju` binary must be installed (default `/usr/bin/juju`)
//! - clouds and credentials are taken from juju's own configuration
//!
//! # Example
//!
//! ```ignore
//! use cloudsweep_core::PlatformClient;
//! use cloudsweep_juju::JujuClient;
//!
//! let client = JujuClient::new("/usr/bin/juju")?.with_debug(true);
//! client.kill_controller("boot-cpc-default-aws-us-east-1", log_dir)?;
//! ```

pub mod client;
pub mod error;

pub use client::JujuClient;
pub use error::{ClientError, Result};
