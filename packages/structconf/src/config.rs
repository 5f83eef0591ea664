//! Search path configuration.
//!
//! A search path is an ordered list of sources, each given as a provider
//! label and a root address:
//! ```json
//! {"sources": [
//!     {"provider": "main", "path": "file://conf"},
//!     {"provider": "plugin", "path": "pkg://plugin.conf"},
//!     {"provider": "schema", "path": "structured://my_app.conf"}
//! ]}
//! ```

use serde::{Deserialize, Serialize};
use structconf_core::{Address, Error, Format, Value};

/// One entry of a search path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Who registered the source. Copied into every `ConfigResult`.
    pub provider: String,
    /// Root address of the source, `<scheme>://<path>` or a bare directory.
    pub path: String,
}

impl SourceConfig {
    pub fn new(provider: impl Into<String>, path: impl Into<String>) -> Self {
        SourceConfig {
            provider: provider.into(),
            path: path.into(),
        }
    }

    pub fn address(&self) -> Address {
        Address::parse(&self.path)
    }
}

/// An ordered list of sources, searched first to last.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchPathConfig {
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl SearchPathConfig {
    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::decode(Format::JSON, e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::encode(Format::JSON, e.to_string()))
    }

    /// Read a search path out of an already parsed config value.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        structconf_serde::from_value(value)
    }

    #[must_use]
    pub fn append(mut self, provider: impl Into<String>, path: impl Into<String>) -> Self {
        self.sources.push(SourceConfig::new(provider, path));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json() {
        let config = SearchPathConfig::from_json(
            r#"{"sources": [
                {"provider": "main", "path": "conf"},
                {"provider": "plugin", "path": "pkg://plugin.conf"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            config,
            SearchPathConfig::default()
                .append("main", "conf")
                .append("plugin", "pkg://plugin.conf")
        );
        assert_eq!(config.sources[0].address().scheme, None);
        assert_eq!(config.sources[1].address().scheme.as_deref(), Some("pkg"));
    }

    #[test]
    fn missing_sources_is_empty() {
        assert!(SearchPathConfig::from_json("{}").unwrap().sources.is_empty());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = SearchPathConfig::from_json(r#"{"sources": [{"path": 1}]}"#).unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn json_round_trip() {
        let config = SearchPathConfig::default().append("schema", "structured://my_app.conf");
        let text = config.to_json().unwrap();
        assert_eq!(SearchPathConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn from_parsed_value() {
        let source: Value = [("provider", "main"), ("path", "file://conf")]
            .into_iter()
            .collect();
        let value: Value = [("sources", Value::Array(vec![source]))].into_iter().collect();
        let config = SearchPathConfig::from_value(value).unwrap();
        assert_eq!(config.sources, vec![SourceConfig::new("main", "file://conf")]);
    }
}
