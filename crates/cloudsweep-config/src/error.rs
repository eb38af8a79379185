use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("home directory not found; set JUJU_HOME to the platform home")]
    HomeDirNotFound,

    #[error("document not found: {}", .0.display())]
    DocumentNotFound(PathBuf),

    #[error("invalid YAML in {name}: {source}")]
    Yaml {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
