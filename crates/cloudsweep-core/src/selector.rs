//! Cloud/region work list selection
//!
//! Walks the public cloud topology and yields one [`WorkItem`] per region of
//! every cloud that has local credentials and a known configuration alias.

use crate::model::{CloudDescriptor, CloudTopology, CredentialSet, WorkItem};
use std::collections::btree_map;

/// Marker shared by every default configuration alias
pub const DEFAULT_ALIAS_PREFIX: &str = "default-";

/// Known cloud names and the configuration alias bootstrapped for them
static CLOUD_ALIASES: &[(&str, &str)] = &[("aws", "default-aws"), ("google", "default-gce")];

/// Look up the configuration alias for a cloud name
pub fn cloud_alias(cloud: &str) -> Option<&'static str> {
    CLOUD_ALIASES
        .iter()
        .find(|(name, _)| *name == cloud)
        .map(|(_, alias)| *alias)
}

/// Look up the cloud a configuration alias bootstraps into
pub fn alias_cloud(alias: &str) -> Option<&'static str> {
    CLOUD_ALIASES
        .iter()
        .find(|(_, known)| *known == alias)
        .map(|(cloud, _)| *cloud)
}

/// Iterate the (alias, region) pairs to bootstrap
///
/// Clouds are visited in topology order and regions in listed order. A cloud
/// without credentials, without a known alias, or whose regions cannot be
/// read is skipped with a warning.
/// Every call starts from the beginning; the iterator can also be cloned.
pub fn iterate_cloud_regions<'a>(
    topology: &'a CloudTopology,
    credentials: &'a CredentialSet,
) -> CloudRegions<'a> {
    CloudRegions {
        clouds: topology.iter(),
        credentials,
        current: None,
    }
}

/// Lazy sequence returned by [`iterate_cloud_regions`]
#[derive(Debug, Clone)]
pub struct CloudRegions<'a> {
    clouds: btree_map::Iter<'a, String, CloudDescriptor>,
    credentials: &'a CredentialSet,
    current: Option<(&'static str, std::slice::Iter<'a, String>)>,
}

impl<'a> CloudRegions<'a> {
    fn next_cloud(&mut self) -> Option<(&'static str, &'a [String])> {
        loop {
            let (cloud, descriptor) = self.clouds.next()?;

            if !self.credentials.contains(cloud) {
                tracing::warn!(
                    "no local credentials for cloud {}, skipping region enumeration",
                    cloud
                );
                continue;
            }

            let Some(alias) = cloud_alias(cloud) else {
                tracing::warn!(
                    "no default configuration alias for cloud {}, skipping",
                    cloud
                );
                continue;
            };

            match descriptor.region_names() {
                Ok(regions) => return Some((alias, regions)),
                Err(problem) => {
                    tracing::warn!(
                        "unreadable regions for cloud {} ({}), skipping",
                        cloud,
                        problem
                    );
                }
            }
        }
    }
}

impl Iterator for CloudRegions<'_> {
    type Item = WorkItem;

    fn next(&mut self) -> Option<WorkItem> {
        loop {
            if let Some((alias, regions)) = &mut self.current {
                if let Some(region) = regions.next() {
                    return Some(WorkItem::new(*alias, region.as_str()));
                }
                self.current = None;
            }

            let (alias, regions) = self.next_cloud()?;
            self.current = Some((alias, regions.iter()));
        }
    }
}
