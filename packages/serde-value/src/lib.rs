//! Serde Integration for structconf
//!
//! - `to_value` / `from_value`: move typed records in and out of `Value`
//! - `JsonCodec`: decodes `Record::Raw` payloads hinted as JSON
//!
//! `JsonCodec` is offered to consumers of loaded records; no source calls it.
//! It does not read YAML, the default leaf format.
//!
//! # Example
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use structconf_serde::{from_value, to_value};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct ImageNet {
//!     name: String,
//!     path: String,
//! }
//!
//! let original = ImageNet { name: "imagenet".into(), path: "/datasets/imagenet".into() };
//! let value = to_value(&original).unwrap();
//! let back: ImageNet = from_value(value).unwrap();
//! assert_eq!(original, back);
//! ```

mod codec;
mod convert;

pub use codec::JsonCodec;
pub use convert::{from_value, json_to_value, to_value, value_to_json};
