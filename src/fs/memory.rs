//! In-memory filesystem for testing.

use std::collections::BTreeMap;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{DirEntry, FileSystem};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

/// In-memory filesystem.
///
/// Paths are compared after dropping `.` components, so `template/` and
/// `./template` designate the same directory. Writing a file creates its
/// missing parent directories.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    nodes: Arc<RwLock<BTreeMap<PathBuf, Node>>>,
}

fn normalize(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}

fn not_found(path: &Path) -> Error {
    Error::IoError(io::Error::new(
        io::ErrorKind::NotFound,
        format!("'{}' does not exist", path.display()),
    ))
}

impl MemoryFileSystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> Result<RwLockReadGuard<'_, BTreeMap<PathBuf, Node>>> {
        self.nodes
            .read()
            .map_err(|_| Error::IoError(io::Error::other("memory filesystem lock poisoned")))
    }

    fn nodes_mut(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<PathBuf, Node>>> {
        self.nodes
            .write()
            .map_err(|_| Error::IoError(io::Error::other("memory filesystem lock poisoned")))
    }

    /// Read a file's content as text (testing helper).
    pub fn read_to_string(&self, path: impl AsRef<Path>) -> Option<String> {
        let nodes = self.nodes().ok()?;
        match nodes.get(&normalize(path.as_ref()))? {
            Node::File(contents) => String::from_utf8(contents.clone()).ok(),
            Node::Dir => None,
        }
    }

    /// List all files, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        self.nodes()
            .map(|nodes| {
                nodes
                    .iter()
                    .filter(|(_, node)| matches!(node, Node::File(_)))
                    .map(|(path, _)| path.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.nodes()
            .map(|nodes| matches!(nodes.get(&normalize(path.as_ref())), Some(Node::Dir)))
            .unwrap_or(false)
    }
}

fn insert_dirs(nodes: &mut BTreeMap<PathBuf, Node>, path: &Path) -> Result<()> {
    let mut current = PathBuf::new();
    for component in path.components() {
        current.push(component);
        match nodes.get(&current) {
            Some(Node::File(_)) => {
                return Err(Error::IoError(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("'{}' exists and is not a directory", current.display()),
                )));
            }
            Some(Node::Dir) => {}
            None => {
                nodes.insert(current.clone(), Node::Dir);
            }
        }
    }
    Ok(())
}

impl FileSystem for MemoryFileSystem {
    fn read_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let path = normalize(path);
        let nodes = self.nodes()?;

        if !path.as_os_str().is_empty() && !matches!(nodes.get(&path), Some(Node::Dir)) {
            return Err(not_found(&path));
        }

        let entries = nodes
            .iter()
            .filter(|(candidate, _)| candidate.parent() == Some(path.as_path()))
            .filter_map(|(candidate, node)| {
                let name = candidate.file_name()?.to_str()?.to_string();
                Some(DirEntry { name, is_dir: matches!(node, Node::Dir) })
            })
            .collect();
        Ok(entries)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = normalize(path);
        match self.nodes()?.get(&path) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            Some(Node::Dir) => Err(Error::IoError(io::Error::other(format!(
                "'{}' is a directory",
                path.display()
            )))),
            None => Err(not_found(&path)),
        }
    }

    fn write(&self, path: &Path, contents: &[u8], _mode: u32) -> Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes_mut()?;

        if let Some(parent) = path.parent() {
            insert_dirs(&mut nodes, parent)?;
        }
        if let Some(Node::Dir) = nodes.get(&path) {
            return Err(Error::IoError(io::Error::other(format!(
                "'{}' is a directory",
                path.display()
            ))));
        }

        nodes.insert(path, Node::File(contents.to_vec()));
        Ok(())
    }

    fn create_dir_all(&self, path: &Path, _mode: u32) -> Result<()> {
        let path = normalize(path);
        let mut nodes = self.nodes_mut()?;
        insert_dirs(&mut nodes, &path)
    }
}
