//! Shared behavioural tests for `ConfigSource` implementations.
//!
//! Every backend builds the same fixture in its own native storage and runs
//! these checks against it:
//!
//! ```text
//! config_without_group.yaml
//! dataset.yaml
//! dataset/
//!     cifar10.yaml
//!     imagenet.yaml
//! optimizer/            (empty)
//! ```

use crate::{ConfigSource, Format, ObjectType, Record, Value};

/// A leaf of the fixture tree.
pub struct FixtureLeaf {
    /// Native path relative to the source root, suffix included.
    pub path: &'static str,
    /// The group it lives in (`""` for the root).
    pub group: &'static str,
    /// Leaf name without suffix.
    pub name: &'static str,
    /// YAML text for file-backed sources.
    pub text: &'static str,
}

pub const LEAVES: &[FixtureLeaf] = &[
    FixtureLeaf {
        path: "config_without_group.yaml",
        group: "",
        name: "config_without_group",
        text: "group: false\n",
    },
    FixtureLeaf {
        path: "dataset.yaml",
        group: "",
        name: "dataset",
        text: "dataset_yaml: true\n",
    },
    FixtureLeaf {
        path: "dataset/cifar10.yaml",
        group: "dataset",
        name: "cifar10",
        text: "dataset:\n  name: cifar10\n  path: /datasets/cifar10\n",
    },
    FixtureLeaf {
        path: "dataset/imagenet.yaml",
        group: "dataset",
        name: "imagenet",
        text: "dataset:\n  name: imagenet\n  path: /datasets/imagenet\n",
    },
];

/// Groups of the fixture tree, parents before children.
pub const GROUPS: &[&str] = &["dataset", "optimizer"];

/// Lay the fixture tree out as real files under `dir`.
pub fn write_fixture_files(dir: &std::path::Path) -> std::io::Result<()> {
    for group in GROUPS {
        std::fs::create_dir_all(dir.join(group))?;
    }
    for leaf in LEAVES {
        std::fs::write(dir.join(leaf.path), leaf.text)?;
    }
    Ok(())
}

fn dataset(name: &str) -> Value {
    let inner: Value = [
        ("name", name.to_string()),
        ("path", format!("/datasets/{}", name)),
    ]
    .into_iter()
    .collect();
    [("dataset", inner)].into_iter().collect()
}

/// The parsed form of a fixture leaf, as registered in structured stores.
pub fn fixture_value(name: &str) -> Value {
    match name {
        "config_without_group" => [("group", false)].into_iter().collect(),
        "dataset" => [("dataset_yaml", true)].into_iter().collect(),
        other => dataset(other),
    }
}

fn fixture_leaf(name: &str) -> &'static FixtureLeaf {
    LEAVES
        .iter()
        .find(|leaf| leaf.name == name)
        .expect("unknown fixture leaf")
}

/// Check a loaded payload against the fixture, in whichever form the source returns.
pub fn assert_fixture_payload(record: &Record, name: &str) {
    match record {
        Record::Raw { bytes, format } => {
            assert_eq!(format, &Format::YAML);
            assert_eq!(bytes.as_ref(), fixture_leaf(name).text.as_bytes());
        }
        Record::Parsed(value) => assert_eq!(value, &fixture_value(name)),
    }
}

pub fn is_group_works(source: &dyn ConfigSource) {
    let cases = [
        ("", true),
        ("optimizer", true),
        ("dataset/imagenet", false),
        ("not_found", false),
    ];
    for (path, expected) in cases {
        assert_eq!(
            source.is_group(path).unwrap(),
            expected,
            "is_group({:?})",
            path
        );
    }
}

pub fn is_config_works(source: &dyn ConfigSource) {
    let cases = [
        ("", false),
        ("dataset", true),
        ("optimizer", false),
        ("dataset/imagenet", true),
        ("dataset/imagenet.yaml", true),
        ("dataset/imagenet.foobar", false),
        ("not_found", false),
    ];
    for (path, expected) in cases {
        assert_eq!(
            source.is_config(path).unwrap(),
            expected,
            "is_config({:?})",
            path
        );
    }
}

pub fn get_type_works(source: &dyn ConfigSource) {
    assert_eq!(source.get_type("").unwrap(), ObjectType::Group);
    assert_eq!(source.get_type("optimizer").unwrap(), ObjectType::Group);
    // The suffixed leaf wins over the group of the same name.
    assert_eq!(source.get_type("dataset").unwrap(), ObjectType::Config);
    assert_eq!(source.get_type("dataset/").unwrap(), ObjectType::Config);
    assert_eq!(source.get_type("dataset/cifar10").unwrap(), ObjectType::Config);
    assert_eq!(source.get_type("dataset/nope").unwrap(), ObjectType::NotFound);
    assert_eq!(source.get_type("nope/deeper").unwrap(), ObjectType::NotFound);
    assert!(source.exists("dataset/imagenet").unwrap());
    assert!(!source.exists("not_found").unwrap());
}

pub fn list_works(source: &dyn ConfigSource) {
    let cases: [(&str, Option<ObjectType>, &[&str]); 6] = [
        ("", None, &["config_without_group", "dataset", "optimizer"]),
        ("", Some(ObjectType::Group), &["dataset", "optimizer"]),
        ("", Some(ObjectType::Config), &["config_without_group", "dataset"]),
        ("dataset", None, &["cifar10", "imagenet"]),
        ("dataset", Some(ObjectType::Group), &[]),
        ("dataset", Some(ObjectType::Config), &["cifar10", "imagenet"]),
    ];
    for (path, filter, expected) in cases {
        assert_eq!(
            source.list(path, filter).unwrap(),
            expected,
            "list({:?}, {:?})",
            path,
            filter
        );
    }
    assert!(source.list("optimizer", None).unwrap().is_empty());
}

pub fn list_non_group_fails(source: &dyn ConfigSource) {
    assert!(source.list("dataset/imagenet", None).unwrap_err().is_misuse());
    assert!(source.list("not_found", None).unwrap_err().is_misuse());
}

pub fn load_config_works(source: &dyn ConfigSource, expected_origin: &str) {
    for leaf in LEAVES {
        let path = if leaf.group.is_empty() {
            leaf.name.to_string()
        } else {
            format!("{}/{}", leaf.group, leaf.name)
        };
        let result = source.load_config(&path).unwrap();
        assert_fixture_payload(&result.value, leaf.name);
        assert_eq!(result.origin, expected_origin);
        assert_eq!(result.provider, source.provider());
    }

    // Both spellings denote the same leaf.
    let bare = source.load_config("dataset/imagenet").unwrap();
    let suffixed = source.load_config("dataset/imagenet.yaml").unwrap();
    assert_eq!(bare, suffixed);
}

pub fn load_missing_fails(source: &dyn ConfigSource) {
    assert!(source
        .load_config("dataset/not_found")
        .unwrap_err()
        .is_not_found());
    assert!(source
        .load_config("dataset/imagenet.foobar")
        .unwrap_err()
        .is_not_found());
    assert!(source.load_config("optimizer").unwrap_err().is_not_found());
    assert!(source.load_config("").unwrap_err().is_not_found());
}

pub fn reads_are_idempotent(source: &dyn ConfigSource) {
    for path in ["", "dataset", "dataset/imagenet", "optimizer", "not_found"] {
        assert_eq!(source.get_type(path).unwrap(), source.get_type(path).unwrap());
        assert_eq!(source.exists(path).unwrap(), source.exists(path).unwrap());
    }
    assert_eq!(source.list("", None).unwrap(), source.list("", None).unwrap());
}

/// Run every check against a source built over the fixture tree.
pub fn run_all(source: &dyn ConfigSource, expected_origin: &str) {
    is_group_works(source);
    is_config_works(source);
    get_type_works(source);
    list_works(source);
    list_non_group_fails(source);
    load_config_works(source, expected_origin);
    load_missing_fails(source);
    reads_are_idempotent(source);
}
