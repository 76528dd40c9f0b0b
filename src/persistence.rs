//! Durable string-keyed storage.
//!
//! The rest of the crate only sees the [`KeyValueStore`] trait: a synchronous
//! get/set of text blobs. [`FileStore`] keeps one file per key in a data
//! directory, [`MemoryStore`] keeps everything in a shared map.
use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use log::{debug, error, trace};
use tempfile::NamedTempFile;

use crate::{NotesError, Result};

/// Key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";
/// Key holding the theme flag.
pub const THEME_KEY: &str = "theme";
/// Key receiving a raw copy of a `notes` blob that failed to load.
pub const NOTES_BACKUP_KEY: &str = "notes.bak";

/// Synchronous string-keyed blob storage.
pub trait KeyValueStore {
    /// Returns the stored text, or `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as a file inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(NotesError::persistence(key, "invalid storage key"));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        trace!("Reading key '{}' from {}", key, path.display());
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                Err(NotesError::persistence(key, e))
            }
        }
    }

    /// Writes through a temporary file in the same directory and renames it
    /// over the target, so readers never observe a partial value.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;

        if !self.dir.exists() {
            debug!("Creating data directory: {}", self.dir.display());
            fs::create_dir_all(&self.dir).map_err(|e| {
                error!("Failed to create directory {}: {}", self.dir.display(), e);
                NotesError::persistence(key, e)
            })?;
        }

        let mut temp_file = NamedTempFile::new_in(&self.dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            NotesError::persistence(key, e)
        })?;

        temp_file
            .write_all(value.as_bytes())
            .and_then(|_| temp_file.flush())
            .map_err(|e| {
                error!("Failed to write temporary file for '{}': {}", key, e);
                NotesError::persistence(key, e)
            })?;

        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist file {}: {}", path.display(), e.error);
            NotesError::persistence(key, e.error)
        })?;

        trace!("Wrote {} bytes to key '{}'", value.len(), key);
        Ok(())
    }
}

/// In-memory store. Clones share the same map, so one handle can be given to
/// the note store and another to the theme preference.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `get` fail, as a disabled store would.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Makes every following `set` fail, as a full or disabled store would.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Writes a value bypassing the failure switch.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.get() {
            return Err(NotesError::persistence(key, "storage is disabled"));
        }
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            return Err(NotesError::persistence(key, "storage quota exceeded"));
        }
        self.insert_raw(key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_file_store_missing_key_is_absent() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get(NOTES_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_store_set_then_get() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"));
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));

        // Only the value file remains, no stray temporaries.
        let files: Vec<_> = fs::read_dir(store.dir()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        for key in ["", "../notes", "a/b", ".hidden"] {
            assert!(matches!(
                store.set(key, "x"),
                Err(NotesError::Persistence { .. })
            ));
        }
        assert!(store.set(NOTES_BACKUP_KEY, "x").is_ok());
    }

    #[test]
    fn test_file_store_write_failure_is_persistence_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let store = FileStore::new(blocker.join("data"));
        assert!(matches!(
            store.set(NOTES_KEY, "[]"),
            Err(NotesError::Persistence { .. })
        ));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set(THEME_KEY, "dark").unwrap();
        assert_eq!(other.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        other.fail_writes(true);
        assert!(store.set(THEME_KEY, "light").is_err());
        assert_eq!(store.raw(THEME_KEY).as_deref(), Some("dark"));

        other.fail_reads(true);
        assert!(matches!(
            store.get(THEME_KEY),
            Err(NotesError::Persistence { .. })
        ));
    }
}
