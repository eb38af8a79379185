//! Error types for the sweep

use std::path::PathBuf;
use thiserror::Error;

/// Failures that stop a run before any bootstrap is attempted
#[derive(Error, Debug)]
pub enum SweepError {
    #[error("failed to load {name}: {source}")]
    Document {
        name: String,
        #[source]
        source: cloudsweep_config::ConfigError,
    },

    #[error("failed to construct platform client: {0}")]
    Client(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Failure of a single bootstrap attempt
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("no cloud is known for configuration {0}")]
    UnknownConfig(String),

    #[error("could not create log directory {}: {source}", .path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}: {stderr}", exit_description(.status))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("controller {0} did not start")]
    NotStarted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_description(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
