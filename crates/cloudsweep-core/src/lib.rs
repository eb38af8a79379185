//! cloudsweep core
//!
//! Bootstraps the platform in every region of every public cloud that has
//! local credentials, one region at a time, and reports the regions that
//! failed without stopping at the first failure.
//!
//! # Architecture
//!
//! ```text
//! public-clouds.yaml ─┐
//!                     ├─▶ selector ──▶ [WorkItem] ──▶ orchestrator ──▶ [RegionFailure]
//! credentials.yaml ───┘                                   │
//!                                                         ▼
//!                                                     invoker
//!                                                         │
//!                                               trait PlatformClient
//! ```

pub mod error;
pub mod invoker;
pub mod logdir;
pub mod model;
pub mod orchestrator;
pub mod selector;

#[cfg(test)]
mod testing;

// Re-exports
pub use error::{BootstrapError, Result, SweepError};
pub use invoker::{BootstrapRequest, PlatformClient, bootstrap_cloud, controller_name};
pub use logdir::{default_log_dir, discard_log_dir, make_logging_dir};
pub use model::{
    CloudDescriptor, CloudTopology, CredentialSet, CredentialsDocument, DEFAULT_PLATFORM_BIN,
    PublicCloudsDocument, RegionFailure, RegionList, RunConfig, WorkItem,
};
pub use orchestrator::{
    CREDENTIALS_DOCUMENT, PUBLIC_CLOUDS_DOCUMENT, Sweep, bootstrap_cloud_regions,
};
pub use selector::{CloudRegions, alias_cloud, cloud_alias, iterate_cloud_regions};
