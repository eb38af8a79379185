//! Resumable, fault-tolerant bootstrap of every selected cloud region

use crate::error::{Result, SweepError};
use crate::invoker::{PlatformClient, bootstrap_cloud};
use crate::model::{
    CloudTopology, CredentialSet, CredentialsDocument, PublicCloudsDocument, RegionFailure,
    RunConfig, WorkItem,
};
use crate::selector::{CloudRegions, iterate_cloud_regions};
use cloudsweep_config::{DocumentSource, load_document};

/// Document describing the public clouds and their regions
pub const PUBLIC_CLOUDS_DOCUMENT: &str = "public-clouds.yaml";

/// Document listing clouds with local credentials
pub const CREDENTIALS_DOCUMENT: &str = "credentials.yaml";

/// A prepared run: loaded inputs plus the shared platform client
pub struct Sweep<C> {
    topology: CloudTopology,
    credentials: CredentialSet,
    client: C,
    run_config: RunConfig,
}

impl<C: PlatformClient> Sweep<C> {
    /// Load both documents and construct the client
    ///
    /// Any failure here is fatal: no region is attempted.
    pub fn prepare<F, E>(
        source: &dyn DocumentSource,
        public_clouds_key: &str,
        credentials_key: &str,
        run_config: RunConfig,
        connect: F,
    ) -> Result<Self>
    where
        F: FnOnce(&RunConfig) -> std::result::Result<C, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let public_clouds: PublicCloudsDocument = load_document(source, public_clouds_key)
            .map_err(|source| SweepError::Document {
                name: public_clouds_key.to_string(),
                source,
            })?;
        let credentials: CredentialsDocument =
            load_document(source, credentials_key).map_err(|source| SweepError::Document {
                name: credentials_key.to_string(),
                source,
            })?;

        let client = connect(&run_config).map_err(|e| SweepError::Client(Box::new(e)))?;

        Ok(Self::new(
            public_clouds.clouds,
            credentials.cloud_names(),
            client,
            run_config,
        ))
    }

    pub fn new(
        topology: CloudTopology,
        credentials: CredentialSet,
        client: C,
        run_config: RunConfig,
    ) -> Self {
        Self {
            topology,
            credentials,
            client,
            run_config,
        }
    }

    /// The full work list, including items `start` will skip
    pub fn work_items(&self) -> CloudRegions<'_> {
        iterate_cloud_regions(&self.topology, &self.credentials)
    }

    /// Attempt every remaining work item, yielding the ones that failed
    pub fn bootstrap_cloud_regions(&self) -> impl Iterator<Item = RegionFailure> + '_ {
        bootstrap_cloud_regions(self.work_items(), &self.client, &self.run_config)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }
}

/// Bootstrap each work item at index `run_config.start` or later, in order
///
/// Items before `start` are neither attempted nor logged. A failed attempt is
/// logged and yielded; the loop always moves on to the next item. Nothing
/// runs until the returned iterator is polled.
pub fn bootstrap_cloud_regions<'a, I, C>(
    work_items: I,
    client: &'a C,
    run_config: &'a RunConfig,
) -> impl Iterator<Item = RegionFailure> + 'a
where
    I: IntoIterator<Item = WorkItem>,
    I::IntoIter: 'a,
    C: PlatformClient + ?Sized,
{
    work_items
        .into_iter()
        .enumerate()
        .skip(run_config.start)
        .filter_map(move |(index, item)| {
            tracing::info!("Bootstrapping {} {} #{}", item.alias, item.region, index);

            match bootstrap_cloud(&item.alias, &item.region, client, &run_config.log_dir) {
                Ok(()) => None,
                Err(e) => {
                    tracing::error!("bootstrap of {} {} failed: {}", item.alias, item.region, e);
                    Some(RegionFailure::new(item, e))
                }
            }
        })
}
