//! The structured config registry.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use structconf_core::listing::{with_suffix, DEFAULT_SUFFIX};
use structconf_core::{ConfigPath, Error, ObjectType, Value};

use crate::ConfigNode;

const SCHEME: &str = "structured";

/// Registers the configs of one namespace into a store.
pub type Initializer = Box<dyn Fn(&StructuredStore) -> Result<(), Error> + Send + Sync>;

#[derive(Default)]
struct Initializers {
    pending: BTreeMap<String, Initializer>,
    completed: BTreeSet<String>,
}

/// A tree of groups and config leaves, shared by `Arc` between every
/// structured source.
///
/// Leaves are stored under their suffixed name (`imagenet.yaml`), so both
/// `imagenet` and `imagenet.yaml` resolve to the same key. Nothing is ever
/// removed or replaced once added.
///
/// When a leaf and a group share a name, `get_type` reports the leaf, as the
/// file and package sources do. This departs from an exact-name-first walk,
/// which would report the group; `list` still shows both.
#[derive(Default)]
pub struct StructuredStore {
    root: RwLock<ConfigNode>,
    initializers: Mutex<Initializers>,
}

fn invalid_name(name: &str) -> Option<&'static str> {
    if name.is_empty() {
        Some("empty name")
    } else if name.contains('/') {
        Some("name must be a single path component")
    } else if name == "." || name == ".." {
        Some("relative component is not a name")
    } else {
        None
    }
}

impl StructuredStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers never leave the tree half-updated, so a poisoned lock still
    // guards a consistent tree.
    fn read_root(&self) -> RwLockReadGuard<'_, ConfigNode> {
        self.root.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_root(&self) -> RwLockWriteGuard<'_, ConfigNode> {
        self.root.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_initializers(&self) -> MutexGuard<'_, Initializers> {
        self.initializers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Create an empty group directly under the root.
    pub fn mkdir(&self, name: &str) -> Result<(), Error> {
        if let Some(problem) = invalid_name(name) {
            return Err(Error::misuse(SCHEME, name, problem));
        }
        if name.ends_with(DEFAULT_SUFFIX) {
            return Err(Error::misuse(
                SCHEME,
                name,
                format!("group names cannot end with '{}'", DEFAULT_SUFFIX),
            ));
        }

        let mut root = self.write_root();
        let children = root
            .children_mut()
            .ok_or_else(|| Error::misuse(SCHEME, "", "root is not a group"))?;
        if children.contains_key(name) {
            return Err(Error::conflict(SCHEME, name));
        }
        log::debug!("Registering group {}", name);
        children.insert(name.to_string(), ConfigNode::group());
        Ok(())
    }

    /// Add a config leaf named `name` to the group at `path`.
    pub fn add(&self, path: &str, name: &str, value: Value) -> Result<(), Error> {
        let group_path = ConfigPath::parse_for(SCHEME, path)?;
        if let Some(problem) = invalid_name(name) {
            let leaf_path = group_path.child(name).to_string();
            return Err(Error::misuse(SCHEME, leaf_path, problem));
        }
        let key = with_suffix(name);
        let leaf_path = group_path.child(&key).to_string();

        let mut root = self.write_root();
        let children = root
            .group_at_mut(&group_path.components)
            .ok_or_else(|| Error::misuse(SCHEME, path, "not a group"))?;
        if children.contains_key(&key) {
            return Err(Error::conflict(SCHEME, leaf_path));
        }
        log::debug!("Registering config {}", leaf_path);
        children.insert(key, ConfigNode::Config(value));
        Ok(())
    }

    /// Add a typed record as a config leaf.
    ///
    /// ```rust
    /// use serde::Serialize;
    /// use structconf_structured::StructuredStore;
    ///
    /// #[derive(Serialize)]
    /// struct MySql {
    ///     host: String,
    ///     port: u16,
    /// }
    ///
    /// let store = StructuredStore::new();
    /// store.mkdir("db").unwrap();
    /// store
    ///     .add_record("db", "mysql", &MySql { host: "localhost".into(), port: 3306 })
    ///     .unwrap();
    /// ```
    ///
    /// Records go through [`structconf_serde::to_value`]: integers outside the
    /// `i64` range fail with `Error::Encode`, and NaN or infinite floats are
    /// stored as `Value::Null`.
    pub fn add_record<T: Serialize>(
        &self,
        path: &str,
        name: &str,
        record: &T,
    ) -> Result<(), Error> {
        let value = structconf_serde::to_value(record)?;
        self.add(path, name, value)
    }

    /// The value of the leaf at `path`.
    pub fn load(&self, path: &str) -> Result<Value, Error> {
        let parsed = ConfigPath::parse_for(SCHEME, path)?;
        let not_found = || Error::not_found(SCHEME, path);
        let (group_path, leaf) = parsed.split_last().ok_or_else(not_found)?;

        let root = self.read_root();
        let children = root.group_at(&group_path.components).ok_or_else(not_found)?;
        match children.get(&with_suffix(leaf)) {
            Some(ConfigNode::Config(value)) => Ok(value.clone()),
            _ => Err(not_found()),
        }
    }

    /// Classify `path`.
    ///
    /// The suffixed key is probed before the exact one, so a leaf wins over a
    /// group of the same name.
    pub fn get_type(&self, path: &str) -> Result<ObjectType, Error> {
        let parsed = ConfigPath::parse_for(SCHEME, path)?;
        let Some((group_path, name)) = parsed.split_last() else {
            return Ok(ObjectType::Group);
        };

        let root = self.read_root();
        let Some(children) = root.group_at(&group_path.components) else {
            return Ok(ObjectType::NotFound);
        };
        Ok(children
            .get(&with_suffix(name))
            .or_else(|| children.get(name))
            .map(ConfigNode::kind)
            .unwrap_or(ObjectType::NotFound))
    }

    /// Sorted child keys of the group at `path`, leaf suffixes included.
    pub fn list(&self, path: &str) -> Result<Vec<String>, Error> {
        Ok(self.entries(path)?.into_iter().map(|(key, _)| key).collect())
    }

    /// Child keys of the group at `path` with their kind, sorted by key.
    pub fn entries(&self, path: &str) -> Result<Vec<(String, ObjectType)>, Error> {
        let parsed = ConfigPath::parse_for(SCHEME, path)?;
        let root = self.read_root();
        let children = root
            .group_at(&parsed.components)
            .ok_or_else(|| Error::misuse(SCHEME, path, "not a group"))?;
        Ok(children
            .iter()
            .map(|(key, node)| (key.clone(), node.kind()))
            .collect())
    }

    /// A copy of the whole tree.
    pub fn snapshot(&self) -> ConfigNode {
        self.read_root().clone()
    }

    /// Register the initializer that populates `namespace`.
    pub fn register_initializer<F>(
        &self,
        namespace: impl Into<String>,
        initializer: F,
    ) -> Result<(), Error>
    where
        F: Fn(&StructuredStore) -> Result<(), Error> + Send + Sync + 'static,
    {
        let namespace = namespace.into();
        let mut initializers = self.lock_initializers();
        if initializers.pending.contains_key(&namespace)
            || initializers.completed.contains(&namespace)
        {
            return Err(Error::conflict(SCHEME, namespace));
        }
        initializers.pending.insert(namespace, Box::new(initializer));
        Ok(())
    }

    pub fn is_initialized(&self, namespace: &str) -> bool {
        self.lock_initializers().completed.contains(namespace)
    }

    /// Run the initializer for `namespace` unless it already succeeded.
    ///
    /// A failed initializer stays registered and runs again on the next call.
    /// The initializer lock is held while it runs, so an initializer must not
    /// call back into `ensure_initialized` or `register_initializer`.
    pub fn ensure_initialized(&self, namespace: &str) -> Result<(), Error> {
        let mut initializers = self.lock_initializers();
        if initializers.completed.contains(namespace) {
            return Ok(());
        }
        let initializer = initializers
            .pending
            .get(namespace)
            .ok_or_else(|| Error::initializer(SCHEME, namespace, "no initializer registered"))?;

        log::debug!("Initializing namespace {}...", namespace);
        if let Err(err) = initializer(self) {
            log::warn!("Initializer for namespace {} failed: {}", namespace, err);
            return Err(Error::initializer(SCHEME, namespace, err.to_string()));
        }

        initializers.pending.remove(namespace);
        initializers.completed.insert(namespace.to_string());
        Ok(())
    }
}
