//! Read-only directory store abstraction over the repository tree.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use verman_util::errors::{VermanError, VermanResult};

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Read-only view of a repository tree.
///
/// Absence is reported as the typed [`VermanError::NotFound`], distinguishable
/// from other I/O failures; the resolver's latest-sentinel fallback branches
/// on that distinction. Listings are returned sorted by name.
pub trait DirectoryStore {
    /// List the immediate entries of a directory.
    fn read_dir(&self, path: &Path) -> VermanResult<Vec<DirEntry>>;

    /// Read a file's contents.
    fn read_file(&self, path: &Path) -> VermanResult<Vec<u8>>;

    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> VermanResult<bool>;
}

/// Store backed by the local filesystem with blocking `std::fs` calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FsStore {
    pub fn new() -> Self {
        Self
    }
}

fn map_io(path: &Path, err: io::Error) -> VermanError {
    if err.kind() == io::ErrorKind::NotFound {
        VermanError::not_found(path)
    } else {
        VermanError::Io(err)
    }
}

impl DirectoryStore for FsStore {
    fn read_dir(&self, path: &Path) -> VermanResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).map_err(|e| map_io(path, e))? {
            let entry = entry.map_err(|e| map_io(path, e))?;
            let file_type = entry.file_type().map_err(|e| map_io(path, e))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => {
                    tracing::trace!("skipping non-UTF-8 entry under {}", path.display());
                    continue;
                }
            };
            entries.push(DirEntry {
                name,
                is_dir: file_type.is_dir(),
            });
        }
        // std::fs::read_dir order is platform-dependent
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> VermanResult<Vec<u8>> {
        fs::read(path).map_err(|e| map_io(path, e))
    }

    fn exists(&self, path: &Path) -> VermanResult<bool> {
        match fs::metadata(path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(VermanError::Io(e)),
        }
    }
}

/// In-memory store for tests and embedded fixtures.
///
/// Holds a flat map of file paths to contents. Directories exist implicitly
/// as the prefixes of stored file paths, so adding `repo/cat/1.0.0/file.txt`
/// brings `repo`, `repo/cat`, and `repo/cat/1.0.0` into existence. Paths are
/// compared component-wise.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating intermediate directories implicitly.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|key| key != path && key.starts_with(path))
    }
}

impl DirectoryStore for MemStore {
    fn read_dir(&self, path: &Path) -> VermanResult<Vec<DirEntry>> {
        if self.files.contains_key(path) {
            return Err(VermanError::Io(io::Error::other(format!(
                "{} is not a directory",
                path.display()
            ))));
        }

        // name -> is_dir, deduplicated and name-sorted
        let mut children: BTreeMap<String, bool> = BTreeMap::new();
        for key in self.files.keys() {
            let Ok(rest) = key.strip_prefix(path) else {
                continue;
            };
            let mut components = rest.components();
            let Some(first) = components.next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            let is_dir = components.next().is_some();
            children
                .entry(name)
                .and_modify(|dir| *dir |= is_dir)
                .or_insert(is_dir);
        }

        if children.is_empty() {
            return Err(VermanError::not_found(path));
        }
        Ok(children
            .into_iter()
            .map(|(name, is_dir)| DirEntry { name, is_dir })
            .collect())
    }

    fn read_file(&self, path: &Path) -> VermanResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| VermanError::not_found(path))
    }

    fn exists(&self, path: &Path) -> VermanResult<bool> {
        Ok(self.files.contains_key(path) || self.is_dir(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> MemStore {
        MemStore::new()
            .with_file("repo/cat/1.0.0/file.txt", "meow")
            .with_file("repo/cat/latest", "1.0.0")
            .with_file("repo/dog/2.0.0/file.txt", "woof")
    }

    #[test]
    fn read_dir_lists_implicit_directories() {
        let store = fixture();
        let entries = store.read_dir(Path::new("repo")).unwrap();
        assert_eq!(
            entries,
            vec![
                DirEntry {
                    name: "cat".to_string(),
                    is_dir: true
                },
                DirEntry {
                    name: "dog".to_string(),
                    is_dir: true
                },
            ]
        );
    }

    #[test]
    fn read_dir_distinguishes_files_from_directories() {
        let store = fixture();
        let entries = store.read_dir(Path::new("repo/cat")).unwrap();
        assert_eq!(
            entries,
            vec![
                DirEntry {
                    name: "1.0.0".to_string(),
                    is_dir: true
                },
                DirEntry {
                    name: "latest".to_string(),
                    is_dir: false
                },
            ]
        );
    }

    #[test]
    fn read_dir_missing_is_not_found() {
        let err = fixture().read_dir(Path::new("repo/bird")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn read_dir_on_file_is_io_error() {
        let err = fixture().read_dir(Path::new("repo/cat/latest")).unwrap_err();
        assert!(matches!(err, VermanError::Io(_)));
    }

    #[test]
    fn read_file_round_trip() {
        let contents = fixture().read_file(Path::new("repo/cat/latest")).unwrap();
        assert_eq!(contents, b"1.0.0");
    }

    #[test]
    fn read_file_missing_is_not_found() {
        let err = fixture().read_file(Path::new("repo/cat/2.0.0")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn exists_covers_files_and_implicit_directories() {
        let store = fixture();
        assert!(store.exists(Path::new("repo/cat/latest")).unwrap());
        assert!(store.exists(Path::new("repo/cat/1.0.0")).unwrap());
        assert!(!store.exists(Path::new("repo/cat/3.0.0")).unwrap());
    }
}
