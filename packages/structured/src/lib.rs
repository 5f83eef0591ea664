//! Programmatically registered configuration.
//!
//! A `StructuredStore` is a tree of groups and config leaves built during a
//! registration phase at startup and read afterwards. Registration for a
//! namespace is done by an initializer, which the store runs at most once
//! (successfully) before the first `StructuredConfigSource` bound to that
//! namespace is handed out.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use structconf_core::{ConfigSource, ObjectType, Value};
//! use structconf_structured::{StructuredConfigSource, StructuredStore};
//!
//! let store = Arc::new(StructuredStore::new());
//! store
//!     .register_initializer("my_app.conf", |store: &StructuredStore| {
//!         store.mkdir("db")?;
//!         store.add("db", "mysql", [("port", 3306)].into_iter().collect::<Value>())
//!     })
//!     .unwrap();
//!
//! let source = StructuredConfigSource::new("my_app", "structured://my_app.conf", store).unwrap();
//! assert_eq!(source.get_type("db/mysql").unwrap(), ObjectType::Config);
//! assert_eq!(source.list("db", None).unwrap(), vec!["mysql"]);
//! ```

mod node;
mod store;
mod structured_source;

pub use node::ConfigNode;
pub use store::{Initializer, StructuredStore};
pub use structured_source::StructuredConfigSource;
