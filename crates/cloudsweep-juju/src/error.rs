//! juju client error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("juju binary not found: {}", .0.display())]
    BinaryNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
