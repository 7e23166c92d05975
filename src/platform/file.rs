//! JSON file backend (native only)
//!
//! All keys live in one JSON object on disk, `{ "key": "raw value", ... }`.
//! Every call re-reads the file, so separate processes see each other's
//! writes. Writes go to a sibling `.tmp` file which is then renamed over the
//! original.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::storage::{BackendError, KeyValueBackend};

/// File name used when the backend is opened on a directory
pub const DEFAULT_FILE_NAME: &str = "local-storage.json";

pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Back the store with the file at `path` (created on first write)
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Back the store with [`DEFAULT_FILE_NAME`] inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, BackendError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| BackendError::Corrupt(e.to_string()))
    }

    /// Map to modify and write back, and whether it had to be started over.
    /// An unreadable file is replaced, otherwise no save or clear could ever
    /// repair it.
    fn read_map_for_write(&self) -> Result<(BTreeMap<String, String>, bool), BackendError> {
        match self.read_map() {
            Ok(map) => Ok((map, false)),
            Err(BackendError::Corrupt(e)) => {
                log::warn!("Replacing unreadable storage file {}: {}", self.path.display(), e);
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), BackendError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(map).map_err(|e| BackendError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        let (mut map, _) = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        let (mut map, replaced) = self.read_map_for_write()?;
        if map.remove(key).is_some() || replaced {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn has(&self, key: &str) -> bool {
        self.read_map()
            .map(|map| map.contains_key(key))
            .unwrap_or(false)
    }
}
