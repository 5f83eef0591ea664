use std::sync::Arc;

use structconf_core::{ConfigSource, Error};
use structconf_file::FileConfigSource;
use structconf_package::{PackageConfigSource, ResourceProvider};
use structconf_structured::{StructuredConfigSource, StructuredStore};

use crate::SourceConfig;

/// Creates config sources from search path entries.
pub trait SourceFactory: Send + Sync {
    fn create(&self, config: &SourceConfig) -> Result<Box<dyn ConfigSource>, Error>;
}

/// Dispatches on the address scheme to the built-in backends.
///
/// Addresses without a scheme are directories. Structured sources share the
/// factory's store and package sources share its resource provider.
pub struct BackendFactory {
    store: Arc<StructuredStore>,
    resources: Arc<dyn ResourceProvider>,
}

impl BackendFactory {
    pub fn new(store: Arc<StructuredStore>, resources: Arc<dyn ResourceProvider>) -> Self {
        BackendFactory { store, resources }
    }

    pub fn store(&self) -> &Arc<StructuredStore> {
        &self.store
    }
}

impl SourceFactory for BackendFactory {
    fn create(&self, config: &SourceConfig) -> Result<Box<dyn ConfigSource>, Error> {
        let address = config.address();
        log::debug!("Creating source {} for {}", config.path, config.provider);
        match address.scheme.as_deref() {
            None | Some(FileConfigSource::SCHEME) => Ok(Box::new(FileConfigSource::new(
                &config.provider,
                &config.path,
            )?)),
            Some(PackageConfigSource::SCHEME) => Ok(Box::new(PackageConfigSource::new(
                &config.provider,
                &config.path,
                self.resources.clone(),
            )?)),
            Some(StructuredConfigSource::SCHEME) => Ok(Box::new(StructuredConfigSource::new(
                &config.provider,
                &config.path,
                self.store.clone(),
            )?)),
            Some(other) => Err(Error::InvalidAddress {
                address: config.path.clone(),
                message: format!("unknown scheme '{}'", other),
            }),
        }
    }
}
