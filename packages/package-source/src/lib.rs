//! Config source backed by bundled resource namespaces.
//!
//! An address such as `pkg://my_app.conf/presets` names a namespace
//! (`my_app.conf`) and a resource directory inside it (`presets`). How
//! namespaces are stored is up to a `ResourceProvider`:
//!
//! - `MemoryResources`: resources built in memory, e.g. from `include_bytes!`
//! - `DirectoryResources`: namespaces laid out as directories on disk

mod directory;
mod memory;
mod package_source;
mod resources;

pub use directory::DirectoryResources;
pub use memory::MemoryResources;
pub use package_source::{split_namespace, PackageConfigSource};
pub use resources::{ResourceError, ResourceProvider};
