//! Session store backed by a JSON file.
//!
//! The file holds a flat string map keyed like browser storage (`token`,
//! `user`, `profileImage`). A missing file is an empty store; removing the
//! last key deletes the file.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod file_store_test;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use session::StoreError;
use session::store::SessionStore;

pub const DEFAULT_SESSION_FILE: &str = ".splito-session.json";

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> BTreeMap<String, String> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %self.path.display(), error = %err, "session file unreadable; treating as empty");
                BTreeMap::new()
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "session file unreadable; treating as empty");
                BTreeMap::new()
            }
        }
    }

    fn write(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let write_failed = |reason: String| StoreError::Write { key: key.to_owned(), reason };
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(write_failed(err.to_string())),
            };
        }
        let raw = serde_json::to_string_pretty(entries).map_err(|e| StoreError::Serialize(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| write_failed(e.to_string()))
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.read().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read();
        entries.insert(key.to_owned(), value.to_owned());
        self.write(key, &entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read();
        if entries.remove(key).is_none() {
            return;
        }
        if let Err(err) = self.write(key, &entries) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to update session file");
        }
    }
}
