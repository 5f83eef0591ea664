//! Core structconf: the resolution contract shared by every config source.
//!
//! This layer defines what it means to address configuration:
//! - `Address`: a `<scheme>://<path>` root a source is bound to
//! - `ConfigPath`: a normalized `group/subgroup/leaf` path relative to that root
//! - `ObjectType`: the tri-state classification (group, config, not found)
//! - `Record`: the opaque payload a load produces, raw bytes or a parsed `Value`
//! - `ConfigSource`: the operations every backend implements identically
//!
//! Backends live in their own crates (`structconf-file`, `structconf-package`,
//! `structconf-structured`).
//!
//! Sources never parse what they load. File and package leaves come back as
//! `Record::Raw` with a format hinted from the file name (usually YAML). The
//! `Codec` trait is only a seam for the consumer of a `ConfigResult`, which
//! brings a codec for the formats it cares about.
//!
//! # Example
//!
//! ```rust
//! use structconf_core::{ConfigSource, Error, ObjectType};
//!
//! fn groups(source: &dyn ConfigSource) -> Result<Vec<String>, Error> {
//!     source.list("", Some(ObjectType::Group))
//! }
//! ```

pub use bytes::Bytes;

mod address;
mod codec;
mod error;
mod format;
pub mod listing;
mod object_type;
mod path;
mod record;
mod source;
mod value;

#[cfg(any(test, feature = "test-utils"))]
pub mod contract_test_suite;

pub use address::Address;
pub use codec::{Codec, NoCodec};
pub use error::Error;
pub use format::Format;
pub use object_type::ObjectType;
pub use path::ConfigPath;
pub use record::Record;
pub use source::{ConfigResult, ConfigSource};
pub use value::Value;
