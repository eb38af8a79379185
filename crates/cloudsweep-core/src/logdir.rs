//! Log directory layout

use std::io;
use std::path::{Path, PathBuf};

const RUN_DIR_PREFIX: &str = "bootstrap-public-clouds-";

/// Environment variable pointing at a CI workspace with an `artifacts` directory
pub const WORKSPACE_ENV: &str = "WORKSPACE";

/// Ensure `<base>/<config>/<region>` exists and return it
pub fn make_logging_dir(base: &Path, config: &str, region: &str) -> io::Result<PathBuf> {
    let log_dir = base.join(config).join(region);
    std::fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

/// Resolve the run's log directory
///
/// An explicit directory is returned untouched. Otherwise a fresh directory
/// is created under `$WORKSPACE/artifacts`, or under the system temporary
/// directory when `WORKSPACE` is unset. The directory outlives the process.
pub fn default_log_dir(explicit: Option<PathBuf>) -> io::Result<PathBuf> {
    match explicit {
        Some(log_dir) => Ok(log_dir),
        None => generate_clean_dir(),
    }
}

/// Remove a generated log directory that was never written to
///
/// A directory with any content is left in place.
pub fn discard_log_dir(log_dir: &Path) {
    match std::fs::remove_dir(log_dir) {
        Ok(()) => tracing::debug!("removed unused log directory {}", log_dir.display()),
        Err(e) => tracing::debug!("kept log directory {}: {}", log_dir.display(), e),
    }
}

fn generate_clean_dir() -> io::Result<PathBuf> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(RUN_DIR_PREFIX);

    let dir = match std::env::var_os(WORKSPACE_ENV) {
        Some(workspace) if !workspace.is_empty() => {
            let artifacts = PathBuf::from(workspace).join("artifacts");
            std::fs::create_dir_all(&artifacts)?;
            builder.tempdir_in(&artifacts)?
        }
        _ => builder.tempdir()?,
    };

    let log_dir = dir.keep();
    tracing::debug!("generated log directory {}", log_dir.display());
    Ok(log_dir)
}
