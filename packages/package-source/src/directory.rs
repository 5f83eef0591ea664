//! Resource namespaces laid out as directories.

use std::{fs, io, path};

use bytes::Bytes;

use crate::{ResourceError, ResourceProvider};

/// Maps dotted namespaces onto directories below a root.
///
/// Namespace `my_app.conf` lives in `<root>/my_app/conf`. When a marker file
/// is required, a namespace directory without it exists but cannot be
/// introspected, which surfaces as `ResourceError::Unavailable`. The marker
/// is hidden at every depth: it never shows up in listings and cannot be
/// addressed.
pub struct DirectoryResources {
    root: path::PathBuf,
    marker: Option<String>,
}

impl DirectoryResources {
    pub fn new(root: impl Into<path::PathBuf>) -> Self {
        DirectoryResources {
            root: root.into(),
            marker: None,
        }
    }

    /// Require every namespace directory to contain `marker`.
    #[must_use]
    pub fn require_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    fn namespace_dir(&self, namespace: &str) -> Result<path::PathBuf, ResourceError> {
        let not_found = || ResourceError::NamespaceNotFound {
            namespace: namespace.to_string(),
        };

        if namespace.is_empty() || namespace.split('.').any(|c| c.is_empty() || c == "..") {
            return Err(not_found());
        }
        let dir = namespace
            .split('.')
            .fold(self.root.clone(), |dir, component| dir.join(component));

        match fs::metadata(&dir) {
            Ok(attr) if attr.is_dir() => {}
            Ok(_) => return Err(not_found()),
            Err(err) if is_absent(&err) => return Err(not_found()),
            Err(source) => {
                return Err(ResourceError::Io {
                    namespace: namespace.to_string(),
                    resource: String::new(),
                    source,
                })
            }
        }

        if let Some(marker) = &self.marker {
            if !dir.join(marker).is_file() {
                return Err(ResourceError::Unavailable {
                    namespace: namespace.to_string(),
                    message: format!("missing marker file '{}'", marker),
                });
            }
        }

        Ok(dir)
    }

    fn resource_path(
        &self,
        namespace: &str,
        resource: &str,
    ) -> Result<path::PathBuf, ResourceError> {
        let dir = self.namespace_dir(namespace)?;
        Ok(resource
            .split('/')
            .filter(|c| !c.is_empty())
            .fold(dir, |dir, component| dir.join(component)))
    }

    fn is_marker(&self, name: &str) -> bool {
        self.marker.as_deref() == Some(name)
    }

    /// Resolve `resource`, failing as absent when it names a marker file.
    fn visible_path(
        &self,
        namespace: &str,
        resource: &str,
    ) -> Result<path::PathBuf, ResourceError> {
        let target = self.resource_path(namespace, resource)?;
        let leaf = resource.rsplit('/').find(|c| !c.is_empty());
        if leaf.is_some_and(|name| self.is_marker(name)) {
            return Err(ResourceError::ResourceNotFound {
                namespace: namespace.to_string(),
                resource: resource.to_string(),
            });
        }
        Ok(target)
    }

    fn io_error(namespace: &str, resource: &str, source: io::Error) -> ResourceError {
        if is_absent(&source) {
            ResourceError::ResourceNotFound {
                namespace: namespace.to_string(),
                resource: resource.to_string(),
            }
        } else {
            ResourceError::Io {
                namespace: namespace.to_string(),
                resource: resource.to_string(),
                source,
            }
        }
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

impl ResourceProvider for DirectoryResources {
    fn exists(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError> {
        let target = match self.visible_path(namespace, resource) {
            Ok(target) => target,
            Err(ResourceError::ResourceNotFound { .. }) => return Ok(false),
            Err(err) => return Err(err),
        };
        log::debug!("Probing {}...", target.display());
        match fs::metadata(&target) {
            Ok(_) => Ok(true),
            Err(err) if is_absent(&err) => Ok(false),
            Err(err) => Err(Self::io_error(namespace, resource, err)),
        }
    }

    fn is_dir(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError> {
        let target = self.visible_path(namespace, resource)?;
        fs::metadata(&target)
            .map(|attr| attr.is_dir())
            .map_err(|err| Self::io_error(namespace, resource, err))
    }

    fn list(&self, namespace: &str, resource: &str) -> Result<Vec<String>, ResourceError> {
        let target = self.visible_path(namespace, resource)?;
        log::debug!("Listing {}...", target.display());
        let entries = fs::read_dir(&target).map_err(|err| {
            if err.kind() == io::ErrorKind::NotADirectory {
                ResourceError::NotADirectory {
                    namespace: namespace.to_string(),
                    resource: resource.to_string(),
                }
            } else {
                Self::io_error(namespace, resource, err)
            }
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| Self::io_error(namespace, resource, err))?;
            let Ok(name) = entry.file_name().into_string() else {
                log::warn!("Skipping non UTF-8 entry {}", entry.path().display());
                continue;
            };
            if self.is_marker(&name) {
                continue;
            }
            names.push(name);
        }
        Ok(names)
    }

    fn read(&self, namespace: &str, resource: &str) -> Result<Bytes, ResourceError> {
        let target = self.visible_path(namespace, resource)?;
        log::debug!("Reading {}...", target.display());
        fs::read(&target)
            .map(Bytes::from)
            .map_err(|err| Self::io_error(namespace, resource, err))
    }
}
