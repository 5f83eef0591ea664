use std::{fs, io, path};

use bytes::Bytes;
use structconf_core::listing::{candidates, collect_listing};
use structconf_core::{
    Address, ConfigPath, ConfigResult, ConfigSource, Error, Format, ObjectType, Record,
};

/// Resolves config paths against a real directory.
///
/// The source keeps nothing but its root; every call goes back to the
/// filesystem, so changes on disk are visible immediately.
pub struct FileConfigSource {
    provider: String,
    root: String,
    dir: path::PathBuf,
}

impl FileConfigSource {
    pub const SCHEME: &'static str = "file";

    /// Bind a source to a directory.
    ///
    /// `address` may be `file://<dir>` or a bare `<dir>`. The directory is not
    /// required to exist; a missing root simply contains nothing. An empty
    /// root is the working directory.
    pub fn new(provider: impl Into<String>, address: &str) -> Result<FileConfigSource, Error> {
        let address = Address::parse_with_default(address, Self::SCHEME)?;
        let dir = if address.path.is_empty() {
            path::PathBuf::from(".")
        } else {
            path::PathBuf::from(&address.path)
        };
        Ok(FileConfigSource {
            provider: provider.into(),
            dir,
            root: address.path,
        })
    }

    fn native_path(&self, relative: &str) -> path::PathBuf {
        if relative.is_empty() {
            self.dir.clone()
        } else {
            self.dir.join(relative)
        }
    }

    /// Find the first existing candidate for `config_path`.
    fn resolve(
        &self,
        config_path: &ConfigPath,
    ) -> Result<Option<(path::PathBuf, fs::Metadata)>, Error> {
        let relative = config_path.to_string();
        for candidate in candidates(&relative) {
            let file_path = self.native_path(&candidate);
            log::debug!("Resolving {}...", file_path.display());
            match fs::metadata(&file_path) {
                Ok(attr) => return Ok(Some((file_path, attr))),
                Err(err) if is_absent(&err) => {
                    log::trace!("No entry at {}", file_path.display());
                }
                Err(err) => return Err(Error::io(Self::SCHEME, relative, err)),
            }
        }
        Ok(None)
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

fn entry_kind(attr: &fs::Metadata) -> ObjectType {
    if attr.is_dir() {
        ObjectType::Group
    } else {
        ObjectType::Config
    }
}

impl ConfigSource for FileConfigSource {
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
        let config_path = ConfigPath::parse_for(Self::SCHEME, config_path)?;
        Ok(match self.resolve(&config_path)? {
            Some((_, attr)) => entry_kind(&attr),
            None => ObjectType::NotFound,
        })
    }

    fn list(
        &self,
        config_path: &str,
        results_filter: Option<ObjectType>,
    ) -> Result<Vec<String>, Error> {
        let parsed = ConfigPath::parse_for(Self::SCHEME, config_path)?;
        let dir_path = self.native_path(&parsed.to_string());
        log::debug!("Listing {}...", dir_path.display());

        let dir_entries = fs::read_dir(&dir_path).map_err(|err| {
            if is_absent(&err) {
                Error::misuse(Self::SCHEME, config_path, "not a group")
            } else {
                Error::io(Self::SCHEME, config_path, err)
            }
        })?;

        let mut entries = Vec::new();
        for entry in dir_entries {
            let entry = entry.map_err(|err| Error::io(Self::SCHEME, config_path, err))?;
            let Ok(name) = entry.file_name().into_string() else {
                log::warn!("Skipping non UTF-8 entry {}", entry.path().display());
                continue;
            };
            // Follows symlinks; a dangling link is not an entry.
            match fs::metadata(entry.path()) {
                Ok(attr) => entries.push((name, entry_kind(&attr))),
                Err(err) if is_absent(&err) => continue,
                Err(err) => return Err(Error::io(Self::SCHEME, config_path, err)),
            }
        }

        Ok(collect_listing(entries, results_filter))
    }

    fn load_config(&self, config_path: &str) -> Result<ConfigResult, Error> {
        let parsed = ConfigPath::parse_for(Self::SCHEME, config_path)?;
        let file_path = match self.resolve(&parsed)? {
            Some((file_path, attr)) if !attr.is_dir() => file_path,
            _ => return Err(Error::not_found(Self::SCHEME, config_path)),
        };

        log::debug!("Reading {}...", file_path.display());
        let bytes = fs::read(&file_path).map_err(|err| Error::io(Self::SCHEME, config_path, err))?;
        let format = file_path
            .file_name()
            .and_then(|name| name.to_str())
            .map(Format::from_file_name)
            .unwrap_or(Format::OCTET_STREAM);

        Ok(ConfigResult {
            value: Record::raw(Bytes::from(bytes), format),
            origin: self.origin(),
            provider: self.provider.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structconf_core::contract_test_suite;

    struct TestFileSource {
        // Keeps the directory alive until the source is dropped.
        _dir: tempfile::TempDir,
        source: FileConfigSource,
    }

    impl TestFileSource {
        fn new() -> TestFileSource {
            let dir = tempfile::tempdir().unwrap();
            contract_test_suite::write_fixture_files(dir.path()).unwrap();
            let root = dir.path().to_str().unwrap().to_string();
            TestFileSource {
                source: FileConfigSource::new("foo", &root).unwrap(),
                _dir: dir,
            }
        }

        fn origin(&self) -> String {
            format!("file://{}", self.source.root())
        }
    }

    #[test]
    fn contract_suite_passes() {
        let test = TestFileSource::new();
        contract_test_suite::run_all(&test.source, &test.origin());
    }

    #[test]
    fn bare_root_gets_file_scheme() {
        let source = FileConfigSource::new("foo", "conf").unwrap();
        assert_eq!(source.origin(), "file://conf");

        let explicit = FileConfigSource::new("foo", "file://conf").unwrap();
        assert_eq!(explicit.origin(), source.origin());
    }

    #[test]
    fn foreign_scheme_rejected() {
        let err = FileConfigSource::new("foo", "pkg://conf").err().unwrap();
        assert!(matches!(err, Error::InvalidAddress { .. }));
    }

    #[test]
    fn loaded_record_is_raw_yaml() {
        let test = TestFileSource::new();
        let result = test.source.load_config("config_without_group").unwrap();
        assert!(result.value.is_raw());
        assert_eq!(result.value.format(), Format::YAML);
        assert_eq!(result.provider, "foo");
    }

    #[test]
    fn unsuffixed_file_is_a_config() {
        let test = TestFileSource::new();
        fs::write(test._dir.path().join("dataset").join("raw.json"), b"{}").unwrap();

        assert!(test.source.is_config("dataset/raw.json").unwrap());
        assert!(!test.source.exists("dataset/raw").unwrap());
        assert_eq!(
            test.source.list("dataset", Some(ObjectType::Config)).unwrap(),
            vec!["cifar10", "imagenet", "raw.json"]
        );
        let result = test.source.load_config("dataset/raw.json").unwrap();
        assert_eq!(result.value.format(), Format::JSON);
    }

    #[test]
    fn missing_root_contains_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("absent");
        let source = FileConfigSource::new("foo", root.to_str().unwrap()).unwrap();

        assert_eq!(source.get_type("").unwrap(), ObjectType::NotFound);
        assert!(source.list("", None).unwrap_err().is_misuse());
        assert!(source.load_config("x").unwrap_err().is_not_found());
    }

    #[test]
    fn empty_root_is_the_working_directory() {
        // Tests run from the package directory.
        let source = FileConfigSource::new("foo", "file://").unwrap();
        assert_eq!(source.origin(), "file://");
        assert!(source.is_group("").unwrap());
        assert!(source.is_group("src").unwrap());
        assert!(source.is_config("src/lib.rs").unwrap());
        assert!(source
            .list("", Some(ObjectType::Group))
            .unwrap()
            .contains(&"src".to_string()));
    }

    #[test]
    fn paths_cannot_escape_root() {
        let test = TestFileSource::new();
        let err = test.source.get_type("../etc").unwrap_err();
        assert!(matches!(&err, Error::InvalidPath { scheme, .. } if scheme == "file"));
    }

    #[test]
    fn disk_changes_are_visible() {
        let test = TestFileSource::new();
        assert!(!test.source.exists("late").unwrap());
        fs::write(test._dir.path().join("late.yaml"), "x: 1\n").unwrap();
        assert!(test.source.is_config("late").unwrap());
    }
}
