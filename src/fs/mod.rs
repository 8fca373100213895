//! The filesystem contract the expander works against, with a disk backed
//! implementation and an in-memory one for tests.

use std::path::Path;

use crate::error::Result;

mod local;
mod memory;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

/// An immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Operations needed to read a template tree and write its expansion.
pub trait FileSystem {
    /// Lists the immediate entries of a directory.
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Reads a whole file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Creates or replaces a file.
    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> Result<()>;

    /// Creates a directory and its missing parents.
    ///
    /// An existing directory is not an error.
    fn create_dir_all(&self, path: &Path, mode: u32) -> Result<()>;
}
