//! JSON persistence for the [`LibraryIndex`].
//!
//! Saves go through a temporary file in the same directory followed by a
//! rename, so a reader never observes a half-written cache.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use shelfcast_common::{Error, LibraryIndex, Result};

/// Location of the index cache on disk.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the index; a missing file is [`Error::CacheMissing`].
    pub fn load(&self) -> Result<LibraryIndex> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::CacheMissing {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|source| Error::CacheCorrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Load the index, treating a missing file as an empty library.
    ///
    /// A corrupt file is still an error.
    pub fn load_or_empty(&self) -> Result<LibraryIndex> {
        match self.load() {
            Err(Error::CacheMissing { .. }) => {
                tracing::info!(path = %self.path.display(), "No cache yet, starting empty");
                Ok(LibraryIndex::new())
            }
            other => other,
        }
    }

    /// Atomically replace the cache with `index`.
    pub fn save(&self, index: &LibraryIndex) -> Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let json = serde_json::to_vec_pretty(index).map_err(|e| Error::Serialize(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| Error::from(e.error))?;

        tracing::debug!(path = %self.path.display(), books = index.len(), "Saved index cache");
        Ok(())
    }
}
