//! Format hints for raw config payloads.

use std::borrow::Cow;
use std::fmt;

/// A hint about the encoding of a raw config payload.
///
/// File-backed sources cannot know how a downstream consumer wants to parse a
/// leaf, so they hand over the bytes together with a format guessed from the
/// file name. Codecs use the hint to decide whether they can decode it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Format(pub Cow<'static, str>);

impl Format {
    /// YAML format (`application/yaml`), the default for config leaves.
    pub const YAML: Format = Format(Cow::Borrowed("application/yaml"));

    /// JSON format (`application/json`)
    pub const JSON: Format = Format(Cow::Borrowed("application/json"));

    /// Opaque binary data (`application/octet-stream`)
    pub const OCTET_STREAM: Format = Format(Cow::Borrowed("application/octet-stream"));

    /// A parsed Value that was never serialized.
    ///
    /// Used for leaves registered programmatically in the structured store.
    pub const VALUE: Format = Format(Cow::Borrowed("application/x-structconf-value"));

    /// Create a format from a static string.
    pub const fn from_static(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }

    /// Create a format from an owned string.
    pub fn new(s: impl Into<String>) -> Self {
        Format(Cow::Owned(s.into()))
    }

    /// Guess the format of a native entry from its file name.
    ///
    /// Only the final extension is considered; anything unrecognised is opaque.
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.').map(|(_, ext)| ext) {
            Some("yaml") | Some("yml") => Self::YAML,
            Some("json") => Self::JSON,
            _ => Self::OCTET_STREAM,
        }
    }

    /// Get the format string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_yaml(&self) -> bool {
        self == &Self::YAML
    }

    pub fn is_json(&self) -> bool {
        self == &Self::JSON
    }

    /// Check if this is the VALUE format (parsed, never serialized).
    pub fn is_value(&self) -> bool {
        self == &Self::VALUE
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&'static str> for Format {
    fn from(s: &'static str) -> Self {
        Format(Cow::Borrowed(s))
    }
}

impl From<String> for Format {
    fn from(s: String) -> Self {
        Format(Cow::Owned(s))
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
