use std::sync::Arc;

use structconf_core::listing::{candidates, collect_listing, concat};
use structconf_core::{
    Address, ConfigPath, ConfigResult, ConfigSource, Error, Format, ObjectType, Record,
};

use crate::{ResourceError, ResourceProvider};

/// Split a resource address into `(namespace, resource)` at its first `/`.
///
/// ```rust
/// use structconf_package::split_namespace;
///
/// assert_eq!(split_namespace("my_app.conf"), ("my_app.conf", ""));
/// assert_eq!(split_namespace("my_app.conf/dataset/imagenet.yaml"), ("my_app.conf", "dataset/imagenet.yaml"));
/// ```
pub fn split_namespace(address: &str) -> (&str, &str) {
    match address.split_once('/') {
        // A leading separator leaves the namespace in the resource half.
        Some(("", resource)) => (resource, ""),
        Some((namespace, resource)) => (namespace, resource),
        None => (address, ""),
    }
}

/// Resolves config paths inside a namespace of bundled resources.
pub struct PackageConfigSource {
    provider: String,
    root: String,
    resources: Arc<dyn ResourceProvider>,
}

impl PackageConfigSource {
    pub const SCHEME: &'static str = "pkg";

    /// Bind a source to `pkg://<namespace>[/<resource dir>]`.
    pub fn new(
        provider: impl Into<String>,
        address: &str,
        resources: Arc<dyn ResourceProvider>,
    ) -> Result<PackageConfigSource, Error> {
        let address = Address::parse_with_scheme(address, Self::SCHEME)?;
        Ok(PackageConfigSource {
            provider: provider.into(),
            root: address.path,
            resources,
        })
    }

    /// Absence collapses to `Ok(())`; anything else is a loud failure.
    fn absent_or_fail(&self, err: ResourceError, config_path: &str) -> Result<(), Error> {
        match err {
            err if err.is_absent() => {
                log::trace!("{}", err);
                Ok(())
            }
            ResourceError::Unavailable { message, .. } => Err(Error::BackendUnavailable {
                scheme: Self::SCHEME.to_string(),
                path: config_path.to_string(),
                message,
            }),
            ResourceError::Io { source, .. } => Err(Error::io(Self::SCHEME, config_path, source)),
            err => Err(Error::BackendUnavailable {
                scheme: Self::SCHEME.to_string(),
                path: config_path.to_string(),
                message: err.to_string(),
            }),
        }
    }

    /// Find the first existing candidate as a `(namespace, resource)` pair.
    fn resolve(&self, config_path: &ConfigPath) -> Result<Option<(String, String)>, Error> {
        let relative = config_path.to_string();
        for candidate in candidates(&relative) {
            let full_path = concat(&self.root, &candidate);
            let (namespace, resource) = split_namespace(&full_path);
            log::debug!("Resolving {} in namespace {}...", resource, namespace);
            match self.resources.exists(namespace, resource) {
                Ok(true) => return Ok(Some((namespace.to_string(), resource.to_string()))),
                Ok(false) => {}
                Err(err) => self.absent_or_fail(err, &relative)?,
            }
        }
        Ok(None)
    }

    fn classify(
        &self,
        namespace: &str,
        resource: &str,
        config_path: &str,
    ) -> Result<ObjectType, Error> {
        match self.resources.is_dir(namespace, resource) {
            Ok(true) => Ok(ObjectType::Group),
            Ok(false) => Ok(ObjectType::Config),
            Err(err) => {
                self.absent_or_fail(err, config_path)?;
                Ok(ObjectType::NotFound)
            }
        }
    }
}

impl ConfigSource for PackageConfigSource {
    fn scheme(&self) -> &str {
        Self::SCHEME
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn root(&self) -> &str {
        &self.root
    }

    fn get_type(&self, config_path: &str) -> Result<ObjectType, Error> {
        let parsed = ConfigPath::parse_for(Self::SCHEME, config_path)?;
        match self.resolve(&parsed)? {
            Some((namespace, resource)) => self.classify(&namespace, &resource, config_path),
            None => Ok(ObjectType::NotFound),
        }
    }

    fn list(
        &self,
        config_path: &str,
        results_filter: Option<ObjectType>,
    ) -> Result<Vec<String>, Error> {
        let parsed = ConfigPath::parse_for(Self::SCHEME, config_path)?;
        let full_path = concat(&self.root, &parsed.to_string());
        let (namespace, resource) = split_namespace(&full_path);
        log::debug!("Listing {} in namespace {}...", resource, namespace);

        let children = match self.resources.list(namespace, resource) {
            Ok(children) => children,
            Err(err) => {
                self.absent_or_fail(err, config_path)?;
                return Err(Error::misuse(Self::SCHEME, config_path, "not a group"));
            }
        };

        let mut entries = Vec::with_capacity(children.len());
        for child in children {
            let child_resource = concat(resource, &child);
            let kind = self.classify(namespace, &child_resource, config_path)?;
            entries.push((child, kind));
        }

        Ok(collect_listing(entries, results_filter))
    }

    fn load_config(&self, config_path: &str) -> Result<ConfigResult, Error> {
        let parsed = ConfigPath::parse_for(Self::SCHEME, config_path)?;
        let not_found = || Error::not_found(Self::SCHEME, config_path);

        let (namespace, resource) = self.resolve(&parsed)?.ok_or_else(not_found)?;
        if self.classify(&namespace, &resource, config_path)? != ObjectType::Config {
            return Err(not_found());
        }

        let bytes = match self.resources.read(&namespace, &resource) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.absent_or_fail(err, config_path)?;
                return Err(not_found());
            }
        };

        Ok(ConfigResult {
            value: Record::raw(bytes, Format::from_file_name(&resource)),
            origin: self.origin(),
            provider: self.provider.clone(),
        })
    }
}
