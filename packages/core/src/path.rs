//! Relative config paths.

use std::fmt;

use crate::Error;

/// A normalized path to a group or config, relative to a source's root.
///
/// Components are separated by `/`. Empty components are dropped, so `""`,
/// `"/"` and `"//"` all name the root group and `"a//b/"` equals `"a/b"`.
/// Components are otherwise free-form (`imagenet.yaml` is a valid component);
/// only `.` and `..` are rejected so a path can never escape its root.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigPath {
    pub components: Vec<String>,
}

impl ConfigPath {
    /// Parse a path string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structconf_core::ConfigPath;
    ///
    /// let path = ConfigPath::parse("dataset/imagenet").unwrap();
    /// assert_eq!(path.len(), 2);
    ///
    /// // Trailing slashes are normalized
    /// assert_eq!(
    ///     ConfigPath::parse("dataset/").unwrap(),
    ///     ConfigPath::parse("dataset").unwrap()
    /// );
    /// ```
    pub fn parse(s: &str) -> Result<Self, Error> {
        ConfigPath::parse_for("config", s)
    }

    /// Parse a path requested from the source with the given scheme.
    ///
    /// Identical to [`ConfigPath::parse`], but a failure names `scheme`.
    pub fn parse_for(scheme: &str, s: &str) -> Result<Self, Error> {
        let components: Vec<String> = s
            .split('/')
            .filter(|c| !c.is_empty())
            .map(|c| c.to_string())
            .collect();

        if let Some(bad) = components.iter().find(|c| *c == "." || *c == "..") {
            return Err(Error::invalid_path(
                scheme,
                s,
                format!("relative component '{}' is not allowed", bad),
            ));
        }

        Ok(ConfigPath { components })
    }

    /// The root group.
    pub fn root() -> Self {
        ConfigPath::default()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.components.iter()
    }

    /// The final component, if any.
    pub fn name(&self) -> Option<&str> {
        self.components.last().map(String::as_str)
    }

    /// Split into the containing group and the final component.
    ///
    /// Returns `None` for the root path, which has no final component.
    pub fn split_last(&self) -> Option<(ConfigPath, &str)> {
        let (last, parent) = self.components.split_last()?;
        Some((
            ConfigPath {
                components: parent.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Append a single child name.
    #[must_use]
    pub fn child(&self, name: &str) -> ConfigPath {
        let mut components = self.components.clone();
        components.push(name.to_string());
        ConfigPath { components }
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &ConfigPath) -> ConfigPath {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        ConfigPath { components }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.components.join("/"))
    }
}
