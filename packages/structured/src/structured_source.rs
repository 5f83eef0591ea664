use std::sync::Arc;

use structconf_core::listing::collect_listing;
use structconf_core::{Address, ConfigResult, ConfigSource, Error, ObjectType, Record};

use crate::StructuredStore;

/// Serves configs registered in a `StructuredStore`.
///
/// The address names the namespace whose initializer populates the store;
/// paths are resolved against the store root.
pub struct StructuredConfigSource {
    provider: String,
    root: String,
    store: Arc<StructuredStore>,
}

impl StructuredConfigSource {
    pub const SCHEME: &'static str = "structured";

    /// Bind a source to `structured://<namespace>`, running the namespace
    /// initializer first if it has not yet succeeded.
    pub fn new(
        provider: impl Into<String>,
        address: &str,
        store: Arc<StructuredStore>,
    ) -> Result<StructuredConfigSource, Error> {
        let address = Address::parse_with_scheme(address, Self::SCHEME)?;
        store.ensure_initialized(&address.path)?;
        Ok(StructuredConfigSource {
            provider: provider.into(),
            root: address.path,
            store,
        })
    }

    pub fn store(&self) -> &Arc<StructuredStore> {
        &self.store
    }
}

impl ConfigSource for StructuredConfigSource {
    fn scheme(&self) -> &str {
        Self::SCHEME
    }

    fn provider(&self) -> &str {
        &self.provider
    }

    fn root(&self) -> &str {
        &self.root
    }

    fn get_type(&self, config_path: &str) -> Result<ObjectType, Error> {
        self.store.get_type(config_path)
    }

    fn list(
        &self,
        config_path: &str,
        results_filter: Option<ObjectType>,
    ) -> Result<Vec<String>, Error> {
        let entries = self.store.entries(config_path)?;
        Ok(collect_listing(entries, results_filter))
    }

    fn load_config(&self, config_path: &str) -> Result<ConfigResult, Error> {
        let value = self.store.load(config_path)?;
        Ok(ConfigResult {
            value: Record::parsed(value),
            origin: self.origin(),
            provider: self.provider.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use structconf_core::contract_test_suite::{self, fixture_value};
    use structconf_core::Value;

    #[derive(Serialize)]
    struct Dataset {
        name: String,
        path: String,
    }

    #[derive(Serialize)]
    struct DatasetConfig {
        dataset: Dataset,
    }

    fn dataset(name: &str) -> DatasetConfig {
        DatasetConfig {
            dataset: Dataset {
                name: name.to_string(),
                path: format!("/datasets/{}", name),
            },
        }
    }

    fn register_fixture(store: &StructuredStore) -> Result<(), Error> {
        store.add("", "config_without_group", fixture_value("config_without_group"))?;
        store.add("", "dataset", fixture_value("dataset"))?;
        store.mkdir("dataset")?;
        store.mkdir("optimizer")?;
        store.add_record("dataset", "cifar10", &dataset("cifar10"))?;
        store.add_record("dataset", "imagenet.yaml", &dataset("imagenet"))?;
        Ok(())
    }

    fn fixture_store() -> Arc<StructuredStore> {
        let store = Arc::new(StructuredStore::new());
        store
            .register_initializer("my_app.conf", register_fixture)
            .unwrap();
        store
    }

    #[test]
    fn contract_suite_passes() {
        let source =
            StructuredConfigSource::new("foo", "structured://my_app.conf", fixture_store())
                .unwrap();
        contract_test_suite::run_all(&source, "structured://my_app.conf");
    }

    #[test]
    fn loaded_record_is_parsed() {
        let source =
            StructuredConfigSource::new("foo", "structured://my_app.conf", fixture_store())
                .unwrap();
        let result = source.load_config("dataset/imagenet").unwrap();
        let expected: Value = [(
            "dataset",
            [("name", "imagenet"), ("path", "/datasets/imagenet")]
                .into_iter()
                .collect::<Value>(),
        )]
        .into_iter()
        .collect();
        assert_eq!(result.value, Record::parsed(expected));
    }

    #[test]
    fn sources_share_one_initialization() {
        let store = fixture_store();
        let first =
            StructuredConfigSource::new("a", "structured://my_app.conf", store.clone()).unwrap();
        let second =
            StructuredConfigSource::new("b", "structured://my_app.conf", store.clone()).unwrap();

        assert!(Arc::ptr_eq(first.store(), second.store()));
        assert_eq!(
            first.list("dataset", None).unwrap(),
            second.list("dataset", None).unwrap()
        );
        assert_eq!(second.load_config("dataset").unwrap().provider, "b");
    }

    #[test]
    fn unknown_namespace_fails_construction() {
        let err = StructuredConfigSource::new("foo", "structured://other", fixture_store())
            .err()
            .unwrap();
        assert!(matches!(&err, Error::Initializer { scheme, .. } if scheme == "structured"));
        assert!(err.to_string().contains("'other'"));
    }

    #[test]
    fn scheme_is_required() {
        for address in ["my_app.conf", "file://my_app.conf"] {
            let err = StructuredConfigSource::new("foo", address, fixture_store())
                .err()
                .unwrap();
            assert!(matches!(err, Error::InvalidAddress { .. }), "{}", address);
        }
    }

    #[test]
    fn listing_strips_leaf_suffixes() {
        let source =
            StructuredConfigSource::new("foo", "structured://my_app.conf", fixture_store())
                .unwrap();
        assert_eq!(
            source.store().list("dataset").unwrap(),
            vec!["cifar10.yaml", "imagenet.yaml"]
        );
        assert_eq!(
            source.list("dataset", None).unwrap(),
            vec!["cifar10", "imagenet"]
        );
    }
}
