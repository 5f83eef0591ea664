//! The adapter seam between `PackageConfigSource` and a resource system.

use std::io;
use std::sync::Arc;

use bytes::Bytes;

/// Failures reported by a `ResourceProvider`.
///
/// The first three variants describe absence and are swallowed by probing
/// operations. `Unavailable` and `Io` are real failures.
#[derive(thiserror::Error, Debug)]
pub enum ResourceError {
    #[error("namespace '{namespace}' not found")]
    NamespaceNotFound { namespace: String },

    #[error("resource '{resource}' not found in namespace '{namespace}'")]
    ResourceNotFound { namespace: String, resource: String },

    #[error("resource '{resource}' in namespace '{namespace}' is not a directory")]
    NotADirectory { namespace: String, resource: String },

    /// The namespace exists but cannot be introspected.
    #[error("namespace '{namespace}' cannot be introspected: {message}")]
    Unavailable { namespace: String, message: String },

    #[error("I/O error reading '{resource}' in namespace '{namespace}': {source}")]
    Io {
        namespace: String,
        resource: String,
        #[source]
        source: io::Error,
    },
}

impl ResourceError {
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            ResourceError::NamespaceNotFound { .. }
                | ResourceError::ResourceNotFound { .. }
                | ResourceError::NotADirectory { .. }
        )
    }
}

/// Read-only access to resources grouped into namespaces.
///
/// Resource paths are `/`-separated and relative to the namespace; `""` is
/// the namespace itself, which is always a directory.
pub trait ResourceProvider: Send + Sync {
    /// Whether `resource` exists in `namespace`.
    ///
    /// Returns `Ok(false)` for a missing resource and
    /// `Err(NamespaceNotFound)` when the namespace itself is missing.
    fn exists(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError>;

    fn is_dir(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError>;

    /// Names of the immediate children of a directory resource, in any order.
    fn list(&self, namespace: &str, resource: &str) -> Result<Vec<String>, ResourceError>;

    fn read(&self, namespace: &str, resource: &str) -> Result<Bytes, ResourceError>;
}

impl<T: ResourceProvider + ?Sized> ResourceProvider for Arc<T> {
    fn exists(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError> {
        self.as_ref().exists(namespace, resource)
    }

    fn is_dir(&self, namespace: &str, resource: &str) -> Result<bool, ResourceError> {
        self.as_ref().is_dir(namespace, resource)
    }

    fn list(&self, namespace: &str, resource: &str) -> Result<Vec<String>, ResourceError> {
        self.as_ref().list(namespace, resource)
    }

    fn read(&self, namespace: &str, resource: &str) -> Result<Bytes, ResourceError> {
        self.as_ref().read(namespace, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absence_classification() {
        let missing = ResourceError::NamespaceNotFound {
            namespace: "app".to_string(),
        };
        assert!(missing.is_absent());

        let broken = ResourceError::Unavailable {
            namespace: "app".to_string(),
            message: "missing marker".to_string(),
        };
        assert!(!broken.is_absent());
        assert!(broken.to_string().contains("missing marker"));
    }
}
