//! Single bootstrap attempt against one cloud region

use crate::error::BootstrapError;
use crate::logdir::make_logging_dir;
use crate::selector::alias_cloud;
use std::path::Path;

const CONTROLLER_PREFIX: &str = "boot-cpc";

/// Longest controller name the platform accepts for these runs
pub const MAX_CONTROLLER_NAME: usize = 30;

/// Platform client abstraction
///
/// Implementations drive a real platform binary or stand in for it in tests.
/// Calls block until the underlying operation has finished.
pub trait PlatformClient {
    /// Bootstrap a controller in `request.cloud`/`request.region`
    fn bootstrap(&self, request: &BootstrapRequest<'_>) -> Result<(), BootstrapError>;

    /// Wait until the controller reports itself started
    fn wait_for_started(&self, controller: &str, log_dir: &Path) -> Result<(), BootstrapError>;

    /// Destroy the controller and everything it created
    fn kill_controller(&self, controller: &str, log_dir: &Path) -> Result<(), BootstrapError>;
}

/// Parameters of one bootstrap call
#[derive(Debug, Clone, Copy)]
pub struct BootstrapRequest<'a> {
    pub controller: &'a str,
    /// Configuration alias the controller is named after
    pub config: &'a str,
    /// Platform cloud the configuration bootstraps into
    pub cloud: &'a str,
    pub region: &'a str,
    pub log_dir: &'a Path,
}

/// Controller name for a (config, region) pair, capped at [`MAX_CONTROLLER_NAME`]
pub fn controller_name(config: &str, region: &str) -> String {
    format!("{}-{}-{}", CONTROLLER_PREFIX, config, region)
        .chars()
        .take(MAX_CONTROLLER_NAME)
        .collect()
}

/// Bootstrap `config` in `region`, confirm it started, then tear it down
///
/// The cloud is the one `config` is the default configuration for. The
/// controller is always killed, even when bootstrap fails part way. The first
/// error wins; a teardown error is only returned when everything before it
/// succeeded, and is logged as a warning otherwise.
pub fn bootstrap_cloud<C>(
    config: &str,
    region: &str,
    client: &C,
    log_dir: &Path,
) -> Result<(), BootstrapError>
where
    C: PlatformClient + ?Sized,
{
    let cloud =
        alias_cloud(config).ok_or_else(|| BootstrapError::UnknownConfig(config.to_string()))?;
    let controller = controller_name(config, region);
    let logging_dir =
        make_logging_dir(log_dir, config, region).map_err(|source| BootstrapError::LogDir {
            path: log_dir.join(config).join(region),
            source,
        })?;

    let request = BootstrapRequest {
        controller: &controller,
        config,
        cloud,
        region,
        log_dir: &logging_dir,
    };

    let outcome = client
        .bootstrap(&request)
        .and_then(|()| client.wait_for_started(&controller, &logging_dir));
    let teardown = client.kill_controller(&controller, &logging_dir);

    match (outcome, teardown) {
        (Ok(()), teardown) => teardown,
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(teardown_error)) => {
            tracing::warn!(
                "teardown of {} also failed, the controller may be left running: {}",
                controller,
                teardown_error
            );
            Err(e)
        }
    }
}
