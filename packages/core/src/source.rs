//! The resolution contract every backend implements.

use crate::{Error, ObjectType, Record};

/// The outcome of a successful `load_config`.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigResult {
    /// The loaded payload, passed through unexamined.
    pub value: Record,
    /// `<scheme>://<root>` of the source the config came from.
    pub origin: String,
    /// Opaque label naming who registered the source.
    pub provider: String,
}

/// A place config definitions can be resolved from.
///
/// Implementations differ in how they reach native storage (a directory, a
/// resource namespace, an in-memory tree) but must agree on what callers can
/// observe:
///
/// - a leaf can be addressed with or without the default `.yaml` suffix;
/// - when both forms exist, the suffixed leaf wins classification;
/// - `list` output is sorted and free of duplicates;
/// - absence is never an error for `exists`/`get_type`, and always an error
///   for `load_config`.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn ConfigSource>`.
pub trait ConfigSource: Send + Sync {
    /// Identifier of the backend kind, e.g. `file`.
    fn scheme(&self) -> &str;

    /// Label identifying who registered this source.
    fn provider(&self) -> &str;

    /// The root this source is bound to, without the scheme.
    fn root(&self) -> &str;

    /// `<scheme>://<root>`.
    fn origin(&self) -> String {
        format!("{}://{}", self.scheme(), self.root())
    }

    /// Classify `config_path` without loading it.
    ///
    /// # Returns
    ///
    /// * `Ok(ObjectType::NotFound)` - Nothing exists at the path.
    /// * `Err(Error)` - Native storage failed for a reason other than absence.
    fn get_type(&self, config_path: &str) -> Result<ObjectType, Error>;

    /// List the immediate children of the group at `config_path`, sorted.
    ///
    /// `results_filter` narrows the output to groups or configs. Fails with
    /// `Error::Misuse` if `config_path` is not a group.
    fn list(
        &self,
        config_path: &str,
        results_filter: Option<ObjectType>,
    ) -> Result<Vec<String>, Error>;

    /// Materialize the config leaf at `config_path`.
    fn load_config(&self, config_path: &str) -> Result<ConfigResult, Error>;

    fn exists(&self, config_path: &str) -> Result<bool, Error> {
        Ok(self.get_type(config_path)? != ObjectType::NotFound)
    }

    fn is_group(&self, config_path: &str) -> Result<bool, Error> {
        Ok(self.get_type(config_path)? == ObjectType::Group)
    }

    fn is_config(&self, config_path: &str) -> Result<bool, Error> {
        Ok(self.get_type(config_path)? == ObjectType::Config)
    }
}

impl<T: ConfigSource + ?Sized> ConfigSource for Box<T> {
    fn scheme(&self) -> &str {
        self.as_ref().scheme()
    }

    fn provider(&self) -> &str {
        self.as_ref().provider()
    }

    fn root(&self) -> &str {
        self.as_ref().root()
    }

    fn get_type(&self, config_path: &str) -> Result<ObjectType, Error> {
        self.as_ref().get_type(config_path)
    }

    fn list(
        &self,
        config_path: &str,
        results_filter: Option<ObjectType>,
    ) -> Result<Vec<String>, Error> {
        self.as_ref().list(config_path, results_filter)
    }

    fn load_config(&self, config_path: &str) -> Result<ConfigResult, Error> {
        self.as_ref().load_config(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    /// Single-leaf source for exercising the provided methods.
    struct OneLeaf;

    impl ConfigSource for OneLeaf {
        fn scheme(&self) -> &str {
            "test"
        }

        fn provider(&self) -> &str {
            "unit"
        }

        fn root(&self) -> &str {
            "root"
        }

        fn get_type(&self, config_path: &str) -> Result<ObjectType, Error> {
            Ok(match config_path {
                "" => ObjectType::Group,
                "leaf" | "leaf.yaml" => ObjectType::Config,
                _ => ObjectType::NotFound,
            })
        }

        fn list(
            &self,
            config_path: &str,
            results_filter: Option<ObjectType>,
        ) -> Result<Vec<String>, Error> {
            if config_path.is_empty() {
                Ok(crate::listing::collect_listing(
                    [("leaf.yaml", ObjectType::Config)],
                    results_filter,
                ))
            } else {
                Err(Error::misuse(self.scheme(), config_path, "not a group"))
            }
        }

        fn load_config(&self, config_path: &str) -> Result<ConfigResult, Error> {
            if self.is_config(config_path)? {
                Ok(ConfigResult {
                    value: Record::parsed(Value::from(1i64)),
                    origin: self.origin(),
                    provider: self.provider().to_string(),
                })
            } else {
                Err(Error::not_found(self.scheme(), config_path))
            }
        }
    }

    #[test]
    fn provided_methods_derive_from_get_type() {
        let source = OneLeaf;
        assert!(source.exists("").unwrap());
        assert!(source.is_group("").unwrap());
        assert!(!source.is_config("").unwrap());
        assert!(source.is_config("leaf").unwrap());
        assert!(!source.exists("missing").unwrap());
        assert_eq!(source.origin(), "test://root");
    }

    #[test]
    fn object_safety_works() {
        let boxed: Box<dyn ConfigSource> = Box::new(OneLeaf);
        assert_eq!(boxed.list("", None).unwrap(), vec!["leaf"]);
        assert_eq!(boxed.load_config("leaf").unwrap().origin, "test://root");
        assert!(boxed.load_config("nope").unwrap_err().is_not_found());
    }
}
