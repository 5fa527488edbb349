//! Access to file contents.
//!
//! Extraction never touches the file system directly; everything goes through a
//! [`SourceReader`] so tests can run from memory.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{PoisonError, RwLock},
};

pub trait SourceReader: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Reads from the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsReader;

impl SourceReader for FsReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }
}

/// In-memory file set. Contents can be changed while shared.
#[derive(Debug, Default)]
pub struct MemoryReader {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), content.into());
    }

    pub fn remove(&self, path: &Path) {
        self.files
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
    }
}

impl SourceReader for MemoryReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reader() {
        let reader = MemoryReader::new().with_file("/a.html", "<div></div>");
        assert_eq!(
            reader.read_to_string(Path::new("/a.html")).unwrap(),
            "<div></div>"
        );
        let err = reader.read_to_string(Path::new("/b.html")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_fs_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pug");
        fs::write(&path, "div#a").unwrap();
        assert_eq!(FsReader.read_to_string(&path).unwrap(), "div#a");
    }
}
