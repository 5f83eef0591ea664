//! `<scheme>://<path>` addresses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

const SEPARATOR: &str = "://";

/// The root a config source is bound to.
///
/// The scheme names the backend kind that owns the address; the path is
/// interpreted by that backend (a directory, a resource namespace, or a
/// structured-store namespace).
#[derive(Clone, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub scheme: Option<String>,
    pub path: String,
}

impl Address {
    /// Split an address at its first `://`.
    ///
    /// A string without `://` yields an address with no scheme.
    ///
    /// ```rust
    /// use structconf_core::Address;
    ///
    /// let a = Address::parse("pkg://my_app.conf");
    /// assert_eq!(a.scheme.as_deref(), Some("pkg"));
    /// assert_eq!(a.path, "my_app.conf");
    ///
    /// assert_eq!(Address::parse("conf").scheme, None);
    /// ```
    pub fn parse(s: &str) -> Self {
        match s.split_once(SEPARATOR) {
            Some((scheme, path)) => Address {
                scheme: Some(scheme.to_string()),
                path: path.to_string(),
            },
            None => Address {
                scheme: None,
                path: s.to_string(),
            },
        }
    }

    /// Parse and require `scheme`, assigning it when the address has none.
    pub fn parse_with_default(s: &str, scheme: &str) -> Result<Self, Error> {
        let mut address = Address::parse(s);
        if address.scheme.is_none() {
            address.scheme = Some(scheme.to_string());
        }
        address.expect_scheme(s, scheme)?;
        Ok(address)
    }

    /// Parse and require an explicit `scheme`.
    pub fn parse_with_scheme(s: &str, scheme: &str) -> Result<Self, Error> {
        let address = Address::parse(s);
        address.expect_scheme(s, scheme)?;
        Ok(address)
    }

    fn expect_scheme(&self, raw: &str, scheme: &str) -> Result<(), Error> {
        match self.scheme.as_deref() {
            Some(found) if found == scheme => Ok(()),
            Some(found) => Err(Error::InvalidAddress {
                address: raw.to_string(),
                message: format!("expected scheme '{}', found '{}'", scheme, found),
            }),
            None => Err(Error::InvalidAddress {
                address: raw.to_string(),
                message: format!("missing scheme, expected '{}{}'", scheme, SEPARATOR),
            }),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}{}{}", scheme, SEPARATOR, self.path),
            None => write!(f, "{}", self.path),
        }
    }
}
