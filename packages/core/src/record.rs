//! The Record type - the opaque payload of a loaded config.

use bytes::Bytes;

use crate::{Codec, Error, Format, Value};

/// A loaded config, handed downstream without being inspected.
///
/// - `Raw`: file contents with a format hint. Sources never parse these; a
///   downstream `Codec` does, when and if it needs to.
/// - `Parsed`: a `Value` registered programmatically in the structured store.
///
/// ```rust
/// use structconf_core::{Record, Format};
/// use bytes::Bytes;
///
/// let record = Record::raw(Bytes::from_static(b"group: false\n"), Format::YAML);
/// assert!(record.is_raw());
/// assert_eq!(record.format(), Format::YAML);
/// ```
#[derive(Clone, PartialEq)]
pub enum Record {
    /// Unparsed bytes with format hint.
    Raw {
        bytes: Bytes,
        format: Format,
    },

    /// Parsed tree structure.
    Parsed(Value),
}

impl Record {
    pub fn raw(bytes: impl Into<Bytes>, format: Format) -> Self {
        Record::Raw {
            bytes: bytes.into(),
            format,
        }
    }

    pub fn parsed(value: Value) -> Self {
        Record::Parsed(value)
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Record::Raw { .. })
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, Record::Parsed(_))
    }

    /// Get the format hint.
    ///
    /// For `Parsed` records, returns `Format::VALUE`.
    pub fn format(&self) -> Format {
        match self {
            Record::Raw { format, .. } => format.clone(),
            Record::Parsed(_) => Format::VALUE,
        }
    }

    /// Raw bytes, if this record was never parsed.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Record::Raw { bytes, .. } => Some(bytes),
            Record::Parsed(_) => None,
        }
    }

    /// Parsed value, if available without parsing.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Record::Raw { .. } => None,
            Record::Parsed(v) => Some(v),
        }
    }

    /// Parse into a Value.
    ///
    /// - For `Parsed` records: returns the value (no cost).
    /// - For `Raw` records: parses the bytes using the codec.
    pub fn into_value(self, codec: &dyn Codec) -> Result<Value, Error> {
        match self {
            Record::Parsed(v) => Ok(v),
            Record::Raw { bytes, format } => codec.decode(&bytes, &format),
        }
    }
}

impl std::fmt::Debug for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Raw { bytes, format } => f
                .debug_struct("Record::Raw")
                .field("bytes_len", &bytes.len())
                .field("format", format)
                .finish(),
            Record::Parsed(v) => f.debug_tuple("Record::Parsed").field(v).finish(),
        }
    }
}

impl From<Value> for Record {
    fn from(v: Value) -> Self {
        Record::Parsed(v)
    }
}
