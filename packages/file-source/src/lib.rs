//! Config source backed by a directory tree.
//!
//! Groups are directories, configs are files. `dataset/imagenet` resolves to
//! `<root>/dataset/imagenet.yaml` if that exists, else to `<root>/dataset/imagenet`.

mod file_source;

pub use file_source::FileConfigSource;
