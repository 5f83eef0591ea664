//! Resources held in memory.

use std::collections::{BTreeMap, BTreeSet};

use bytes::Bytes;

use crate::{ResourceError, ResourceProvider};

#[derive(Clone, Debug, Default)]
struct Bundle {
    files: BTreeMap<String, Bytes>,
    dirs: BTreeSet<String>,
}

impl Bundle {
    fn add_parents(&mut self, resource: &str) {
        let mut current = resource;
        while let Some((parent, _)) = current.rsplit_once('/') {
            self.dirs.insert(parent.to_string());
            current = parent;
        }
    }

    fn is_dir(&self, resource: &str) -> bool {
        resource.is_empty() || self.dirs.contains(resource)
    }
}

fn normalize(resource: &str) -> String {
    resource
        .split('/')
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

fn parent_of(resource: &str) -> &str {
    resource.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

fn name_of(resource: &str) -> &str {
    resource.rsplit_once('/').map(|(_, name)| name).unwrap_or(resource)
}

/// Namespaced resources built in memory.
///
/// Directories are implied by file paths; empty directories are declared
/// with `dir`.
///
/// # Example
///
/// ```rust
/// use structconf_package::{MemoryResources, ResourceProvider};
///
/// let resources = MemoryResources::new()
///     .file("my_app.conf", "dataset/imagenet.yaml", &b"name: imagenet\n"[..])
///     .dir("my_app.conf", "optimizer");
///
/// assert!(resources.is_dir("my_app.conf", "dataset").unwrap());
/// assert!(resources.exists("my_app.conf", "optimizer").unwrap());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryResources {
    namespaces: BTreeMap<String, Bundle>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a namespace, even if it holds nothing.
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespaces.entry(namespace.to_string()).or_default();
        self
    }

    /// Add a file, creating its namespace and parent directories.
    #[must_use]
    pub fn file(mut self, namespace: &str, resource: &str, contents: impl Into<Bytes>) -> Self {
        let resource = normalize(resource);
        let bundle = self.namespaces.entry(namespace.to_string()).or_default();
        bundle.add_parents(&resource);
        bundle.files.insert(resource, contents.into());
        self
    }

    /// Add a directory, creating its namespace and parent directories.
    #[must_use]
    pub fn dir(mut self, namespace: &str, resource: &str) -> Self {
        let resource = normalize(resource);
        let bundle = self.namespaces.entry(namespace.to_string()).or_default();
        bundle.add_parents(&resource);
        if !resource.is_empty() {
            bundle.dirs.insert(resource);
        }
        self
    }

    fn bundle(&self, namespace: &str) -> Result<&Bundle, ResourceError> {
        self.namespaces
            .get(namespace)
            .ok_or_else(|| ResourceError::NamespaceNotFound {
                namespace: namespace.to_string(),
            })
    }
}

impl ResourceProvider for MemoryResources {
    fn exists(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError> {
        let bundle = self.bundle(namespace)?;
        let resource = normalize(resource);
        Ok(bundle.is_dir(&resource) || bundle.files.contains_key(&resource))
    }

    fn is_dir(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError> {
        let bundle = self.bundle(namespace)?;
        let resource = normalize(resource);
        if bundle.is_dir(&resource) {
            Ok(true)
        } else if bundle.files.contains_key(&resource) {
            Ok(false)
        } else {
            Err(ResourceError::ResourceNotFound {
                namespace: namespace.to_string(),
                resource,
            })
        }
    }

    fn list(&self, namespace: &str, resource: &str) -> Result<Vec<String>, ResourceError> {
        let bundle = self.bundle(namespace)?;
        let resource = normalize(resource);
        if !bundle.is_dir(&resource) {
            return Err(if bundle.files.contains_key(&resource) {
                ResourceError::NotADirectory {
                    namespace: namespace.to_string(),
                    resource,
                }
            } else {
                ResourceError::ResourceNotFound {
                    namespace: namespace.to_string(),
                    resource,
                }
            });
        }

        let children: BTreeSet<&str> = bundle
            .files
            .keys()
            .chain(bundle.dirs.iter())
            .filter(|path| parent_of(path) == resource)
            .map(|path| name_of(path))
            .collect();
        Ok(children.into_iter().map(str::to_string).collect())
    }

    fn read(&self, namespace: &str, resource: &str) -> Result<Bytes, ResourceError> {
        let bundle = self.bundle(namespace)?;
        let resource = normalize(resource);
        bundle
            .files
            .get(&resource)
            .cloned()
            .ok_or(ResourceError::ResourceNotFound {
                namespace: namespace.to_string(),
                resource,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources() -> MemoryResources {
        MemoryResources::new()
            .file("app", "a.yaml", &b"a"[..])
            .file("app", "nested/deeper/b.yaml", &b"b"[..])
            .dir("app", "empty")
            .namespace("bare")
    }

    #[test]
    fn implied_directories() {
        let r = resources();
        assert!(r.is_dir("app", "").unwrap());
        assert!(r.is_dir("app", "nested").unwrap());
        assert!(r.is_dir("app", "nested/deeper").unwrap());
        assert!(!r.is_dir("app", "a.yaml").unwrap());
        assert!(r.is_dir("bare", "").unwrap());
    }

    #[test]
    fn missing_namespace_and_resource() {
        let r = resources();
        assert!(matches!(
            r.exists("nope", ""),
            Err(ResourceError::NamespaceNotFound { .. })
        ));
        assert!(!r.exists("app", "missing.yaml").unwrap());
        assert!(matches!(
            r.is_dir("app", "missing"),
            Err(ResourceError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn listing_immediate_children() {
        let r = resources();
        assert_eq!(r.list("app", "").unwrap(), vec!["a.yaml", "empty", "nested"]);
        assert_eq!(r.list("app", "nested").unwrap(), vec!["deeper"]);
        assert!(r.list("app", "empty").unwrap().is_empty());
        assert!(r.list("bare", "").unwrap().is_empty());
        assert!(matches!(
            r.list("app", "a.yaml"),
            Err(ResourceError::NotADirectory { .. })
        ));
    }

    #[test]
    fn read_files() {
        let r = resources();
        assert_eq!(r.read("app", "/nested/deeper/b.yaml").unwrap(), &b"b"[..]);
        assert!(r.read("app", "nested").unwrap_err().is_absent());
    }
}
