//! JSON codec implementation.

use bytes::Bytes;
use structconf_core::{Codec, Error, Format, Value};

use crate::convert::json_to_value;

/// A codec that decodes JSON payloads.
///
/// ```rust
/// use structconf_serde::JsonCodec;
/// use structconf_core::{Format, Record, Value};
///
/// let record = Record::raw(&b"{\"group\": false}"[..], Format::JSON);
/// let value = record.into_value(&JsonCodec).unwrap();
/// assert_eq!(value, [("group", false)].into_iter().collect::<Value>());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn decode(&self, bytes: &Bytes, format: &Format) -> Result<Value, Error> {
        if !self.supports(format) {
            return Err(Error::UnsupportedFormat(format.clone()));
        }

        let json: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|e| Error::decode(format.clone(), e.to_string()))?;

        Ok(json_to_value(json))
    }

    fn supports(&self, format: &Format) -> bool {
        format == &Format::JSON
    }
}
