//! Key-value persistence port
//!
//! The cart never talks to a storage backend directly; it is handed a
//! [`KeyValueStore`] so memory, file or remote stores can be swapped freely.

use std::{
    fmt::Debug,
    fs, io,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use thiserror::Error;

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Keys must be non-empty and made of ASCII alphanumerics, `-` or `_`.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    /// The backing filesystem failed.
    #[error("storage i/o error for key `{key}`")]
    Io {
        /// Key being read or written.
        key: String,

        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Whole-value get/set storage.
pub trait KeyValueStore: Debug {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

fn check_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// In-memory store, used in tests and for throwaway sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;

        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        check_key(key)?;

        self.entries.insert(key.to_string(), value);

        Ok(())
    }
}

/// Directory-backed store: one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        check_key(key)?;

        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        check_key(key)?;

        let io_error = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_error)?;

        // Staged write, then rename over the live file.
        let staging = self.dir.join(format!(".{key}.json.tmp"));

        fs::write(&staging, value).map_err(io_error)?;
        fs::rename(&staging, self.path(key)).map_err(io_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn memory_store_round_trip() -> TestResult {
        let mut store = MemoryStore::new();

        assert_eq!(store.get("cart")?, None);

        store.set("cart", "[]".to_string())?;

        assert_eq!(store.get("cart")?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn rejects_path_like_keys() {
        let mut store = MemoryStore::new();

        let result = store.set("../cart", String::new());

        assert!(
            matches!(result, Err(StoreError::InvalidKey(ref key)) if key == "../cart"),
            "expected InvalidKey, got {result:?}"
        );
    }

    #[test]
    fn file_store_missing_key_is_none() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = FileStore::new(dir.path());

        assert_eq!(store.get("cart")?, None);

        Ok(())
    }

    #[test]
    fn file_store_creates_directory_and_overwrites() -> TestResult {
        let dir = tempfile::tempdir()?;
        let mut store = FileStore::new(dir.path().join("nested"));

        store.set("cart", "[1]".to_string())?;
        store.set("cart", "[2]".to_string())?;

        assert_eq!(store.get("cart")?.as_deref(), Some("[2]"));
        assert!(dir.path().join("nested/cart.json").exists());

        Ok(())
    }
}
