//! Data model: cloud topology, credentials, work items and run parameters

use crate::error::BootstrapError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Default location of the platform binary
pub const DEFAULT_PLATFORM_BIN: &str = "/usr/bin/juju";

/// Public clouds indexed by cloud name, iterated in name order
pub type CloudTopology = BTreeMap<String, CloudDescriptor>;

/// Names of clouds with local credentials
pub type CredentialSet = BTreeSet<String>;

/// A public cloud as described in `public-clouds.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CloudDescriptor {
    #[serde(default)]
    pub regions: RegionList,
}

impl CloudDescriptor {
    pub fn new<I, S>(regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: RegionList::Names(regions.into_iter().map(Into::into).collect()),
        }
    }

    /// Region names in document order, or why they could not be read
    pub fn region_names(&self) -> Result<&[String], &str> {
        match &self.regions {
            RegionList::Names(names) => Ok(names.as_slice()),
            RegionList::Malformed(problem) => Err(problem.as_str()),
        }
    }
}

/// The `regions` entry of a cloud
///
/// Decoding never fails on shape: a value that is not a list, a mapping or
/// null is kept as `Malformed` so that only clouds actually selected for a
/// run are affected by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionList {
    Names(Vec<String>),
    Malformed(String),
}

impl Default for RegionList {
    fn default() -> Self {
        RegionList::Names(Vec::new())
    }
}

impl<'de> Deserialize<'de> for RegionList {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(RegionList::from_value(value.unwrap_or(Value::Null)))
    }
}

impl RegionList {
    /// Accepts a list of names, a mapping keyed by name, or null.
    fn from_value(value: Value) -> Self {
        let names: Vec<Value> = match value {
            Value::Null => return RegionList::default(),
            Value::Sequence(seq) => seq,
            Value::Mapping(map) => map.into_iter().map(|(key, _)| key).collect(),
            other => {
                return RegionList::Malformed(format!(
                    "expected a list or a mapping of regions, got {}",
                    value_kind(&other)
                ));
            }
        };

        let mut regions = Vec::with_capacity(names.len());
        for name in names {
            match name {
                Value::String(name) => regions.push(name),
                other => {
                    return RegionList::Malformed(format!(
                        "region name must be a string, got {}",
                        value_kind(&other)
                    ));
                }
            }
        }
        RegionList::Names(regions)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// `public-clouds.yaml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicCloudsDocument {
    #[serde(default)]
    pub clouds: CloudTopology,
}

/// `credentials.yaml`
///
/// Only the cloud names are used; credential contents are never inspected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsDocument {
    #[serde(default)]
    pub credentials: BTreeMap<String, Value>,
}

impl CredentialsDocument {
    pub fn cloud_names(self) -> CredentialSet {
        self.credentials.into_keys().collect()
    }
}

/// One (configuration alias, region) pair to bootstrap
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    pub alias: String,
    pub region: String,
}

impl WorkItem {
    pub fn new(alias: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.alias, self.region)
    }
}

/// Immutable parameters of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Number of leading work items already processed by an earlier run
    pub start: usize,
    pub debug: bool,
    /// Advisory only; never interrupts an attempt
    pub deadline: Option<DateTime<Utc>>,
    pub platform_bin: PathBuf,
    pub log_dir: PathBuf,
}

impl RunConfig {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            start: 0,
            debug: false,
            deadline: None,
            platform_bin: PathBuf::from(DEFAULT_PLATFORM_BIN),
            log_dir: log_dir.into(),
        }
    }

    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<DateTime<Utc>>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_platform_bin(mut self, platform_bin: impl Into<PathBuf>) -> Self {
        self.platform_bin = platform_bin.into();
        self
    }

    /// Whether the advisory deadline lies before `now`
    pub fn deadline_passed(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }
}

/// A work item whose bootstrap attempt failed
#[derive(Debug)]
pub struct RegionFailure {
    pub alias: String,
    pub region: String,
    pub error: BootstrapError,
}

impl RegionFailure {
    pub fn new(item: WorkItem, error: BootstrapError) -> Self {
        Self {
            alias: item.alias,
            region: item.region,
            error,
        }
    }
}

impl fmt::Display for RegionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.alias, self.region, self.error)
    }
}
