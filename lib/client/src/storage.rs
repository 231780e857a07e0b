//! Locally persisted client state.
//!
//! A JSON file of fixed keys, read once at startup and rewritten on
//! every change. The server is always authoritative; these snapshots
//! only let the client render something sensible before the first
//! round-trip completes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Persisted keys. Fixed so snapshots survive client upgrades.
pub const KEY_THEME: &str = "theme";
pub const KEY_MENU_OPEN: &str = "menu-open";
pub const KEY_SESSION: &str = "session";
pub const KEY_CONFIG: &str = "config";
pub const KEY_AUTH: &str = "auth";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// File-backed key/value snapshot store.
pub struct LocalStorage {
    path: PathBuf,
    values: RwLock<BTreeMap<String, serde_json::Value>>,
}

impl LocalStorage {
    /// Open the storage file, or start empty when it doesn't exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode a key. Missing keys and stale shapes both read
    /// as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let values = self.values.read().unwrap();
        values
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Store a key and rewrite the file.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        {
            let mut values = self.values.write().unwrap();
            values.insert(key.to_string(), serde_json::to_value(value)?);
        }
        self.save()
    }

    /// Drop a key and rewrite the file. Unknown keys are a no-op.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let removed = self.values.write().unwrap().remove(key).is_some();
        if removed {
            self.save()?;
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.read().unwrap().contains_key(key)
    }

    fn save(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = {
            let values = self.values.read().unwrap();
            serde_json::to_string_pretty(&*values)?
        };
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
