//! structconf: one path scheme for configuration, wherever it lives.
//!
//! Definitions are addressed as `group/subgroup/leaf` against a source bound
//! to a root address:
//! - `file://<dir>` (or a bare `<dir>`): a directory tree
//! - `pkg://<namespace>[/<dir>]`: bundled resources behind a `ResourceProvider`
//! - `structured://<namespace>`: a `StructuredStore` populated by a registered initializer
//!
//! A `ConfigRepository` searches several sources in order. Which sources make
//! up the search path is plain data (`SearchPathConfig`), turned into live
//! sources by a `SourceFactory`.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use structconf::{
//!     BackendFactory, ConfigRepository, MemoryResources, SearchPathConfig, StructuredStore,
//! };
//!
//! let resources = MemoryResources::new()
//!     .file("my_app.conf", "db/mysql.yaml", &b"port: 3306\n"[..]);
//! let factory = BackendFactory::new(Arc::new(StructuredStore::new()), Arc::new(resources));
//!
//! let config = SearchPathConfig::from_json(
//!     r#"{"sources": [{"provider": "my_app", "path": "pkg://my_app.conf"}]}"#,
//! )
//! .unwrap();
//! let repository = ConfigRepository::from_config(&config, &factory).unwrap();
//!
//! assert_eq!(repository.list("db", None).unwrap(), vec!["mysql"]);
//! let loaded = repository.load_config("db/mysql").unwrap();
//! assert_eq!(loaded.origin, "pkg://my_app.conf");
//! ```

mod config;
mod factory;
mod repository;

pub use config::{SearchPathConfig, SourceConfig};
pub use factory::{BackendFactory, SourceFactory};
pub use repository::ConfigRepository;

pub use structconf_core::{
    listing, Address, Codec, ConfigPath, ConfigResult, ConfigSource, Error, Format, NoCodec,
    ObjectType, Record, Value,
};
pub use structconf_file::FileConfigSource;
pub use structconf_package::{
    split_namespace, DirectoryResources, MemoryResources, PackageConfigSource, ResourceError,
    ResourceProvider,
};
pub use structconf_serde::{from_value, to_value, JsonCodec};
pub use structconf_structured::{ConfigNode, StructuredConfigSource, StructuredStore};
