//! Disk backed filesystem.

use log::trace;
use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

use super::{DirEntry, FileSystem};
use crate::error::{Error, Result};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let name = entry
                .file_name()
                .to_str()
                .ok_or_else(|| Error::InvalidFileNameError { parent: path.to_path_buf() })?
                .to_string();
            entries.push(DirEntry { name, is_dir: entry.file_type().is_dir() });
        }
        trace!("listed {} entries in '{}'", entries.len(), path.display());
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(Error::IoError)
    }

    fn write(&self, path: &Path, contents: &[u8], mode: u32) -> Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        let mut file = options.open(path).map_err(Error::IoError)?;
        file.write_all(contents).map_err(Error::IoError)
    }

    fn create_dir_all(&self, path: &Path, mode: u32) -> Result<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(mode);
        }
        #[cfg(not(unix))]
        let _ = mode;

        builder.create(path).map_err(Error::IoError)
    }
}
