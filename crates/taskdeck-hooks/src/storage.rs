//! Values synchronized with a JSON key/value file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::warn;

use crate::{Result, StorageError};

/// JSON object on disk, read and written as a whole.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Use `path` as backing file. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the value stored under `key`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut entries = self.read()?;
        entries
            .remove(key)
            .map(serde_json::from_value)
            .transpose()
            .map_err(StorageError::from)
    }

    /// Store `value` under `key`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut entries = self.read()?;
        entries.insert(key.to_owned(), serde_json::to_value(value)?);
        self.write(&entries)
    }

    /// Remove `key`. Missing keys are ignored.
    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read()?;
        if entries.remove(key).is_some() {
            self.write(&entries)?;
        }
        Ok(())
    }

    fn read(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if contents.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str(&contents)? {
            Value::Object(entries) => Ok(entries),
            _ => Err(StorageError::NotAnObject(self.path.clone())),
        }
    }

    fn write(&self, entries: &Map<String, Value>) -> Result<()> {
        let io_err = |source: io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, contents).map_err(io_err)
    }
}

/// In-memory value mirrored to a [`LocalStore`] key.
///
/// Reads fall back to the initial value and writes keep the in-memory value
/// even when the store cannot be used; both cases are logged.
#[derive(Debug, Clone)]
pub struct Persisted<T> {
    store: LocalStore,
    key: String,
    initial: T,
    value: T,
}

impl<T> Persisted<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Load the stored value for `key`, or `initial` when absent or unreadable.
    pub fn load(store: LocalStore, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Ok(Some(value)) => value,
            Ok(None) => initial.clone(),
            Err(err) => {
                warn!(key = %key, path = %store.path().display(), "failed to read stored value: {err}");
                initial.clone()
            }
        };
        Self {
            store,
            key,
            initial,
            value,
        }
    }

    /// Current value.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and write it through.
    pub fn set(&mut self, value: T) {
        if let Err(err) = self.store.set(&self.key, &value) {
            warn!(key = %self.key, "failed to persist value: {err}");
        }
        self.value = value;
    }

    /// Apply `f` to the current value and write the result through.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value);
        self.set(next);
    }

    /// Delete the stored key and fall back to the initial value.
    pub fn remove(&mut self) {
        if let Err(err) = self.store.remove(&self.key) {
            warn!(key = %self.key, "failed to remove stored value: {err}");
        }
        self.value = self.initial.clone();
    }
}
