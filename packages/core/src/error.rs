//! Error types shared by every config source.

use std::io;

use crate::format::Format;

/// Errors raised by config sources and the structured store.
///
/// Probing operations (`exists`, `get_type`) never produce `NotFound`; absence is
/// reported through `ObjectType::NotFound` instead. Every source-level variant
/// carries the scheme of the source and the path or namespace that was requested.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Nothing loadable exists at the requested path.
    #[error("{scheme}: config not found: '{path}'")]
    NotFound { scheme: String, path: String },

    /// A `mkdir` or `add` would replace an existing entry.
    #[error("{scheme}: already exists: '{path}'")]
    Conflict { scheme: String, path: String },

    /// The caller pointed a group-only operation at a leaf or at nothing.
    #[error("{scheme}: {message}: '{path}'")]
    Misuse {
        scheme: String,
        path: String,
        message: String,
    },

    /// A present namespace could not be introspected by the resource system.
    #[error("{scheme}: unable to introspect '{path}': {message}")]
    BackendUnavailable {
        scheme: String,
        path: String,
        message: String,
    },

    /// The address a source was constructed with is malformed or has the wrong scheme.
    #[error("invalid address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    /// A relative config path could not be normalized.
    #[error("{scheme}: invalid config path '{path}': {message}")]
    InvalidPath {
        scheme: String,
        path: String,
        message: String,
    },

    /// The registration initializer for a structured namespace is missing or failed.
    #[error("{scheme}: initializer for namespace '{namespace}' failed: {message}")]
    Initializer {
        scheme: String,
        namespace: String,
        message: String,
    },

    /// A native I/O failure other than absence.
    #[error("{scheme}: I/O error at '{path}': {source}")]
    Io {
        scheme: String,
        path: String,
        #[source]
        source: io::Error,
    },

    /// Codec failed to decode bytes.
    #[error("decode error ({format}): {message}")]
    Decode { format: Format, message: String },

    /// Codec failed to encode a value.
    #[error("encode error ({format}): {message}")]
    Encode { format: Format, message: String },

    /// Format not supported by codec.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(Format),
}

impl Error {
    pub fn not_found(scheme: &str, path: impl Into<String>) -> Self {
        Error::NotFound {
            scheme: scheme.to_string(),
            path: path.into(),
        }
    }

    pub fn conflict(scheme: &str, path: impl Into<String>) -> Self {
        Error::Conflict {
            scheme: scheme.to_string(),
            path: path.into(),
        }
    }

    pub fn misuse(scheme: &str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Misuse {
            scheme: scheme.to_string(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_path(
        scheme: &str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidPath {
            scheme: scheme.to_string(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn initializer(
        scheme: &str,
        namespace: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::Initializer {
            scheme: scheme.to_string(),
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    pub fn io(scheme: &str, path: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            scheme: scheme.to_string(),
            path: path.into(),
            source,
        }
    }

    pub fn decode(format: Format, message: impl Into<String>) -> Self {
        Error::Decode {
            format,
            message: message.into(),
        }
    }

    pub fn encode(format: Format, message: impl Into<String>) -> Self {
        Error::Encode {
            format,
            message: message.into(),
        }
    }

    /// True for the ordinary-absence class of failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }

    pub fn is_misuse(&self) -> bool {
        matches!(self, Error::Misuse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn not_found_display_carries_scheme_and_path() {
        let e = Error::not_found("file", "dataset/not_found");
        let display = e.to_string();
        assert!(display.contains("file"));
        assert!(display.contains("dataset/not_found"));
        assert!(e.is_not_found());
    }

    #[test]
    fn conflict_display() {
        let e = Error::conflict("structured", "dataset");
        assert!(e.to_string().contains("already exists"));
        assert!(e.is_conflict());
        assert!(!e.is_not_found());
    }

    #[test]
    fn misuse_display() {
        let e = Error::misuse("pkg", "dataset/imagenet", "not a group");
        let display = e.to_string();
        assert!(display.contains("not a group"));
        assert!(display.contains("dataset/imagenet"));
        assert!(e.is_misuse());
    }

    #[test]
    fn path_and_initializer_errors_carry_scheme() {
        let e = Error::invalid_path("file", "../etc", "relative component '..' is not allowed");
        assert!(e.to_string().starts_with("file: "));
        assert!(e.to_string().contains("../etc"));

        let e = Error::initializer("structured", "my_app.conf", "no initializer registered");
        let display = e.to_string();
        assert!(display.starts_with("structured: "));
        assert!(display.contains("my_app.conf"));
    }

    #[test]
    fn decode_error_display() {
        let e = Error::decode(Format::JSON, "unexpected token");
        let display = e.to_string();
        assert!(display.contains("decode error"));
        assert!(display.contains("json"));
        assert!(display.contains("unexpected token"));
    }

    #[test]
    fn io_error_source() {
        let e = Error::io(
            "file",
            "conf",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(StdError::source(&e).is_some());
    }

    #[test]
    fn other_error_source_is_none() {
        let e = Error::not_found("file", "x");
        assert!(StdError::source(&e).is_none());
    }
}
