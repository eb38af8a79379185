//! Platform home lookup and YAML document loading.
//!
//! Documents such as `public-clouds.yaml` and `credentials.yaml` live in the
//! platform home directory. Consumers go through [`DocumentSource`] so that
//! tests and callers with a different layout can substitute their own source.

pub mod error;

pub use error::*;

use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable naming the platform home directory
pub const HOME_ENV: &str = "JUJU_HOME";

const DEFAULT_HOME_DIR: &str = "cloud-city";

/// Resolve the platform home directory
///
/// 1. `JUJU_HOME` environment variable
/// 2. `~/cloud-city`
pub fn platform_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV)
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    dirs::home_dir()
        .map(|home| home.join(DEFAULT_HOME_DIR))
        .ok_or(ConfigError::HomeDirNotFound)
}

/// A source of named YAML documents
pub trait DocumentSource {
    /// Load and parse the document called `name`
    fn load(&self, name: &str) -> Result<serde_yaml::Value>;
}

/// Load a document and decode it into `T`
pub fn load_document<T: DeserializeOwned>(source: &dyn DocumentSource, name: &str) -> Result<T> {
    let value = source.load(name)?;
    serde_yaml::from_value(value).map_err(|source| ConfigError::Yaml {
        name: name.to_string(),
        source,
    })
}

/// Reads documents as files relative to a root directory
#[derive(Debug, Clone)]
pub struct HomeDirSource {
    root: PathBuf,
}

impl HomeDirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source rooted at [`platform_home`]
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(platform_home()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for HomeDirSource {
    fn load(&self, name: &str) -> Result<serde_yaml::Value> {
        let path = self.root.join(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::DocumentNotFound(path));
            }
            Err(e) => return Err(e.into()),
        };

        serde_yaml::from_str(&content).map_err(|source| ConfigError::Yaml {
            name: name.to_string(),
            source,
        })
    }
}

/// Documents held in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: BTreeMap<String, serde_yaml::Value>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document parsed from YAML text
    pub fn with_yaml(mut self, name: impl Into<String>, yaml: &str) -> Result<Self> {
        let name = name.into();
        let value = serde_yaml::from_str(yaml).map_err(|source| ConfigError::Yaml {
            name: name.clone(),
            source,
        })?;
        self.documents.insert(name, value);
        Ok(self)
    }
}

impl DocumentSource for InMemorySource {
    fn load(&self, name: &str) -> Result<serde_yaml::Value> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::DocumentNotFound(PathBuf::from(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serial_test::serial;
    use std::fs;

    #[test]
    #[serial]
    fn test_platform_home_from_env() {
        let temp_dir = tempfile::tempdir().unwrap();

        temp_env::with_var(HOME_ENV, Some(temp_dir.path()), || {
            assert_eq!(platform_home().unwrap(), temp_dir.path());
        });
    }

    #[test]
    #[serial]
    fn test_platform_home_default() {
        temp_env::with_var_unset(HOME_ENV, || {
            let home = platform_home().unwrap();
            assert!(home.ends_with("cloud-city"));
        });
    }

    #[test]
    #[serial]
    fn test_platform_home_empty_env_falls_back() {
        temp_env::with_var(HOME_ENV, Some(""), || {
            let home = platform_home().unwrap();
            assert!(home.ends_with("cloud-city"));
        });
    }

    #[test]
    fn test_home_dir_source_loads_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(
            temp_dir.path().join("test.yaml"),
            "data:\n  alpha: A\n  beta: B\n",
        )
        .unwrap();

        let source = HomeDirSource::new(temp_dir.path());
        let value = source.load("test.yaml").unwrap();

        let expected: serde_yaml::Value =
            serde_yaml::from_str("data: {alpha: A, beta: B}").unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn test_home_dir_source_missing_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = HomeDirSource::new(temp_dir.path());

        match source.load("absent.yaml") {
            Err(ConfigError::DocumentNotFound(path)) => {
                assert_eq!(path, temp_dir.path().join("absent.yaml"));
            }
            other => panic!("Expected DocumentNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_home_dir_source_invalid_yaml() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("broken.yaml"), "data: [unclosed\n").unwrap();

        let source = HomeDirSource::new(temp_dir.path());
        let err = source.load("broken.yaml").unwrap_err();

        assert!(matches!(err, ConfigError::Yaml { ref name, .. } if name == "broken.yaml"));
    }

    #[test]
    fn test_load_document_typed() {
        #[derive(Deserialize)]
        struct Doc {
            data: BTreeMap<String, String>,
        }

        let source = InMemorySource::new()
            .with_yaml("doc.yaml", "data:\n  alpha: A\n")
            .unwrap();
        let doc: Doc = load_document(&source, "doc.yaml").unwrap();

        assert_eq!(doc.data.get("alpha").map(String::as_str), Some("A"));
    }

    #[test]
    fn test_load_document_type_mismatch() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Doc {
            data: Vec<String>,
        }

        let source = InMemorySource::new()
            .with_yaml("doc.yaml", "data: scalar\n")
            .unwrap();
        let result: Result<Doc> = load_document(&source, "doc.yaml");

        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn test_in_memory_source_missing() {
        let source = InMemorySource::new();
        assert!(matches!(
            source.load("credentials.yaml"),
            Err(ConfigError::DocumentNotFound(_))
        ));
    }
}
