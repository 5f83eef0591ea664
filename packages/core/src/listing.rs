//! Extension-optional naming and deterministic listing, shared by all sources.

use std::collections::BTreeSet;

use crate::ObjectType;

/// The suffix a config leaf may be addressed with or without.
pub const DEFAULT_SUFFIX: &str = ".yaml";

/// Append the default suffix unless `name` already carries it.
pub fn with_suffix(name: &str) -> String {
    if name.ends_with(DEFAULT_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, DEFAULT_SUFFIX)
    }
}

/// Remove one trailing default suffix, if present.
pub fn strip_suffix(name: &str) -> &str {
    name.strip_suffix(DEFAULT_SUFFIX).unwrap_or(name)
}

/// Native locations to probe for a relative path, in preference order.
///
/// The suffixed form comes first. The root (`""`) and already-suffixed paths
/// have a single candidate.
///
/// ```rust
/// use structconf_core::listing::candidates;
///
/// assert_eq!(candidates("dataset/imagenet"), vec!["dataset/imagenet.yaml", "dataset/imagenet"]);
/// assert_eq!(candidates("dataset/imagenet.yaml"), vec!["dataset/imagenet.yaml"]);
/// assert_eq!(candidates(""), vec![""]);
/// ```
pub fn candidates(path: &str) -> Vec<String> {
    if path.is_empty() || path.ends_with('/') || path.ends_with(DEFAULT_SUFFIX) {
        vec![path.to_string()]
    } else {
        vec![with_suffix(path), path.to_string()]
    }
}

/// Join two `/`-separated paths, treating an empty side as absent.
pub fn concat(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{}/{}", a.trim_end_matches('/'), b.trim_start_matches('/')),
    }
}

/// Turn native `(entry name, kind)` pairs into a sorted list of logical names.
///
/// Group entries keep their name; config entries lose the default suffix. A
/// name that is both a group and a config shows up once per matching kind
/// and once overall.
pub fn collect_listing<I, S>(entries: I, filter: Option<ObjectType>) -> Vec<String>
where
    I: IntoIterator<Item = (S, ObjectType)>,
    S: AsRef<str>,
{
    let mut names = BTreeSet::new();
    for (name, kind) in entries {
        if !kind.matches(filter) {
            continue;
        }
        let name = name.as_ref();
        match kind {
            ObjectType::Group => {
                names.insert(name.to_string());
            }
            ObjectType::Config => {
                names.insert(strip_suffix(name).to_string());
            }
            ObjectType::NotFound => {}
        }
    }
    names.into_iter().collect()
}
