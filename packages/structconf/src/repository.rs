//! Ordered search over several config sources.

use std::collections::BTreeSet;

use structconf_core::{ConfigResult, ConfigSource, Error, ObjectType};

use crate::{SearchPathConfig, SourceFactory};

const SCHEME: &str = "repository";

/// A search path of config sources.
///
/// Probes and loads go to the first source that has the path; listings merge
/// every source that has a group at the path.
#[derive(Default)]
pub struct ConfigRepository {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigRepository {
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        ConfigRepository { sources }
    }

    /// Build every source of `config` with `factory`, in order.
    pub fn from_config(
        config: &SearchPathConfig,
        factory: &dyn SourceFactory,
    ) -> Result<Self, Error> {
        let sources = config
            .sources
            .iter()
            .map(|source| factory.create(source))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ConfigRepository { sources })
    }

    /// Append a source with the lowest precedence.
    pub fn push(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    pub fn sources(&self) -> &[Box<dyn ConfigSource>] {
        &self.sources
    }

    /// The first source in which `config_path` exists.
    pub fn find_source(&self, config_path: &str) -> Result<Option<&dyn ConfigSource>, Error> {
        for source in &self.sources {
            if source.exists(config_path)? {
                return Ok(Some(&**source));
            }
        }
        Ok(None)
    }

    pub fn get_type(&self, config_path: &str) -> Result<ObjectType, Error> {
        for source in &self.sources {
            let kind = source.get_type(config_path)?;
            if kind != ObjectType::NotFound {
                return Ok(kind);
            }
        }
        Ok(ObjectType::NotFound)
    }

    pub fn exists(&self, config_path: &str) -> Result<bool, Error> {
        Ok(self.get_type(config_path)? != ObjectType::NotFound)
    }

    pub fn is_group(&self, config_path: &str) -> Result<bool, Error> {
        Ok(self.get_type(config_path)? == ObjectType::Group)
    }

    pub fn is_config(&self, config_path: &str) -> Result<bool, Error> {
        Ok(self.get_type(config_path)? == ObjectType::Config)
    }

    /// Sorted union of the children of `config_path` across sources.
    ///
    /// Sources without a group at `config_path` are skipped. Fails with
    /// `Error::Misuse` when no source has one.
    pub fn list(
        &self,
        config_path: &str,
        results_filter: Option<ObjectType>,
    ) -> Result<Vec<String>, Error> {
        let mut names = BTreeSet::new();
        let mut found_group = false;
        for source in &self.sources {
            match source.list(config_path, results_filter) {
                Ok(children) => {
                    found_group = true;
                    names.extend(children);
                }
                Err(err) if err.is_misuse() => {
                    log::trace!("No group {} in {}", config_path, source.origin());
                }
                Err(err) => return Err(err),
            }
        }
        if !found_group {
            return Err(Error::misuse(SCHEME, config_path, "not a group"));
        }
        Ok(names.into_iter().collect())
    }

    /// Load `config_path` from the first source that has it as a config.
    pub fn load_config(&self, config_path: &str) -> Result<ConfigResult, Error> {
        for source in &self.sources {
            if source.is_config(config_path)? {
                log::debug!("Loading {} from {}", config_path, source.origin());
                return source.load_config(config_path);
            }
        }
        Err(Error::not_found(SCHEME, config_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use structconf_core::{Record, Value};
    use structconf_structured::{StructuredConfigSource, StructuredStore};

    fn leaf(n: i64) -> Value {
        [("n", n)].into_iter().collect()
    }

    fn structured(
        namespace: &'static str,
        register: fn(&StructuredStore) -> Result<(), Error>,
    ) -> Box<dyn ConfigSource> {
        let store = Arc::new(StructuredStore::new());
        store.register_initializer(namespace, register).unwrap();
        let address = format!("structured://{}", namespace);
        Box::new(StructuredConfigSource::new(namespace, &address, store).unwrap())
    }

    fn repository() -> ConfigRepository {
        let first = structured("first", |store| {
            store.mkdir("db")?;
            store.add("db", "mysql", leaf(1))?;
            store.add("", "shared", leaf(1))
        });
        let second = structured("second", |store| {
            store.mkdir("db")?;
            store.mkdir("server")?;
            store.add("db", "mysql", leaf(2))?;
            store.add("db", "postgresql", leaf(2))?;
            store.add("", "shared", leaf(2))
        });
        ConfigRepository::new(vec![first, second])
    }

    #[test]
    fn first_source_wins() {
        let repo = repository();
        let result = repo.load_config("db/mysql").unwrap();
        assert_eq!(result.value, Record::parsed(leaf(1)));
        assert_eq!(result.provider, "first");

        let result = repo.load_config("db/postgresql").unwrap();
        assert_eq!(result.value, Record::parsed(leaf(2)));
        assert_eq!(result.origin, "structured://second");
    }

    #[test]
    fn listing_merges_sources() {
        let repo = repository();
        assert_eq!(repo.list("", None).unwrap(), vec!["db", "server", "shared"]);
        assert_eq!(repo.list("db", None).unwrap(), vec!["mysql", "postgresql"]);
        assert!(repo.list("server", None).unwrap().is_empty());
        assert!(repo.list("missing", None).unwrap_err().is_misuse());
    }

    #[test]
    fn probes() {
        let repo = repository();
        assert_eq!(repo.get_type("server").unwrap(), ObjectType::Group);
        assert!(repo.is_config("db/postgresql").unwrap());
        assert!(!repo.exists("db/sqlite").unwrap());
        assert_eq!(
            repo.find_source("server").unwrap().map(|s| s.origin()),
            Some("structured://second".to_string())
        );
        assert!(repo.find_source("nope").unwrap().is_none());
    }

    #[test]
    fn missing_config_is_not_found() {
        let repo = repository();
        assert!(repo.load_config("db/sqlite").unwrap_err().is_not_found());
        assert!(repo.load_config("server").unwrap_err().is_not_found());
        assert!(ConfigRepository::default()
            .load_config("db/mysql")
            .unwrap_err()
            .is_not_found());
    }
}
