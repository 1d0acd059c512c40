//! # Storage Backends
//!
//! Keyed local string storage behind the [`StorageBackend`] trait. Each
//! key holds one JSON document; the [`crate::store::Store`] owns
//! serialization and key naming.
//!
//! Two backends:
//! - [`FileStorage`] - one `<key>.json` file per key under a directory
//! - [`MemoryStorage`] - a HashMap, for tests and ephemeral sessions

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreResult;

// =============================================================================
// StorageBackend Trait
// =============================================================================

/// Keyed string storage.
///
/// Implementations only move raw strings; callers decide what the strings
/// contain. A missing key is `Ok(None)`, not an error - only genuine I/O
/// failures surface as `Err`.
pub trait StorageBackend {
    /// Reads the entry for `key`, if present.
    fn load(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes (or replaces) the entry for `key`.
    fn save(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the entry for `key`, if present.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// File Storage
// =============================================================================

/// File-backed storage: `<dir>/<key>.json` per entry.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file storage");
        Ok(FileStorage { dir })
    }

    /// The directory entries live under.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage for tests and ephemeral sessions. Entries die with
/// the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Creates an empty in-memory backend.
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Seeds an entry directly, bypassing the Store. Test hook for
    /// corrupt-data and pre-populated scenarios.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load("k").unwrap(), None);

        storage.save("k", "v").unwrap();
        assert_eq!(storage.load("k").unwrap().as_deref(), Some("v"));

        storage.remove("k").unwrap();
        assert_eq!(storage.load("k").unwrap(), None);

        // Removing a missing key is fine.
        storage.remove("k").unwrap();
    }

    #[test]
    fn test_file_storage_roundtrip() {
        let dir = std::env::temp_dir().join(format!("bh-storage-{}", std::process::id()));
        let mut storage = FileStorage::new(&dir).unwrap();

        assert_eq!(storage.load("bh_cart").unwrap(), None);

        storage.save("bh_cart", "[1,2,3]").unwrap();
        assert_eq!(storage.load("bh_cart").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.join("bh_cart.json").exists());

        storage.remove("bh_cart").unwrap();
        assert_eq!(storage.load("bh_cart").unwrap(), None);
        storage.remove("bh_cart").unwrap();

        fs::remove_dir_all(&dir).unwrap();
    }
}
