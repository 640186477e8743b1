//! Named-blob storage for save documents.
//!
//! The persistence engine reads and writes whole documents by name; how a
//! name maps to a file (or to nothing at all) is the store's concern.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Storage collaborator resolving names to blobs of text.
pub trait BlobStore {
    fn read(&self, name: &str) -> io::Result<String>;

    fn write(&self, name: &str, contents: &str) -> io::Result<()>;
}

/// Stores each blob as `<name>.json` under a base directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    directory: PathBuf,
}

impl DirectoryStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Full path of the file backing the blob stored under `name`.
    pub fn file_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.json"))
    }
}

impl Default for DirectoryStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl BlobStore for DirectoryStore {
    fn read(&self, name: &str) -> io::Result<String> {
        fs::read_to_string(self.file_path(name))
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        fs::write(self.file_path(name), contents)
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.blobs.borrow().contains_key(name)
    }
}

impl BlobStore for MemoryStore {
    fn read(&self, name: &str) -> io::Result<String> {
        self.blobs.borrow().get(name).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no blob named \"{name}\""))
        })
    }

    fn write(&self, name: &str, contents: &str) -> io::Result<()> {
        self.blobs
            .borrow_mut()
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }
}
