//! Single-record store
//!
//! The `try_*` methods report failures as [`StoreError`]. The plain methods
//! never fail: they log the error and return `false`/`None`, which is all
//! the planner UI needs.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{Result, StoreError, json_kind};
use super::record::{PersistedRecord, UserData};
use crate::config::StoreConfig;
use crate::platform::{Clock, KeyValueBackend, SystemClock};

/// Persists one [`UserData`] object under one key, stamped with its save time
pub struct StorageStore<B, C = SystemClock> {
    backend: B,
    clock: C,
    config: StoreConfig,
}

impl<B: KeyValueBackend> StorageStore<B> {
    /// Store using the default key and the system clock
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    pub fn with_config(backend: B, config: StoreConfig) -> Self {
        Self {
            backend,
            clock: SystemClock,
            config,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl StorageStore<crate::platform::LocalStorageBackend> {
    /// Store backed by the page's LocalStorage
    pub fn local() -> Result<Self> {
        Ok(Self::new(crate::platform::LocalStorageBackend::new()?))
    }
}

impl<B: KeyValueBackend, C: Clock> StorageStore<B, C> {
    /// Replace the time source
    pub fn with_clock<C2: Clock>(self, clock: C2) -> StorageStore<B, C2> {
        StorageStore {
            backend: self.backend,
            clock,
            config: self.config,
        }
    }

    pub fn key(&self) -> &str {
        &self.config.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Raw record, `None` when nothing (or an empty string) is stored
    fn read_record(&self) -> Result<Option<PersistedRecord>> {
        match self.backend.get(self.key())? {
            Some(raw) if !raw.is_empty() => PersistedRecord::from_json(&raw).map(Some),
            _ => Ok(None),
        }
    }

    /// Overwrite the record with `data`; returns the timestamp written
    pub fn try_save(&self, data: &UserData) -> Result<String> {
        let record = PersistedRecord::stamp(data, self.clock.now_iso8601());
        let json = record.to_json()?;
        self.backend.set(self.key(), &json)?;
        let timestamp = record.last_saved.unwrap_or_default();
        log::info!("Saved {} fields under '{}' at {}", data.len(), self.key(), timestamp);
        Ok(timestamp)
    }

    /// Stored user data without `lastSaved`, or `None` if never saved
    pub fn try_load(&self) -> Result<Option<UserData>> {
        Ok(self.read_record()?.map(|record| record.data))
    }

    /// Remove the record. Clearing an empty store succeeds.
    pub fn try_clear(&self) -> Result<()> {
        self.backend.remove(self.key())?;
        log::info!("Cleared saved data under '{}'", self.key());
        Ok(())
    }

    /// Timestamp of the stored record, or `None` if never saved
    pub fn try_last_saved_time(&self) -> Result<Option<String>> {
        Ok(self.read_record()?.and_then(|record| record.last_saved))
    }

    /// Save any value that serializes to a JSON object
    pub fn try_save_as<T: Serialize>(&self, value: &T) -> Result<String> {
        match serde_json::to_value(value).map_err(StoreError::Serialize)? {
            Value::Object(data) => self.try_save(&data),
            other => Err(StoreError::NotAnObject(json_kind(&other))),
        }
    }

    /// Load the record into a typed value
    pub fn try_load_as<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        self.try_load()?
            .map(|data| serde_json::from_value(Value::Object(data)).map_err(StoreError::Convert))
            .transpose()
    }

    pub fn save(&self, data: &UserData) -> bool {
        match self.try_save(data) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to save data: {}", e);
                false
            }
        }
    }

    pub fn load(&self) -> Option<UserData> {
        self.try_load().unwrap_or_else(|e| {
            log::error!("Failed to load data: {}", e);
            None
        })
    }

    pub fn clear(&self) -> bool {
        match self.try_clear() {
            Ok(()) => true,
            Err(e) => {
                log::error!("Failed to clear data: {}", e);
                false
            }
        }
    }

    /// Presence check only; the value is not parsed
    pub fn has_saved_data(&self) -> bool {
        self.backend.has(self.key())
    }

    pub fn get_last_saved_time(&self) -> Option<String> {
        self.try_last_saved_time().unwrap_or_else(|e| {
            log::error!("Failed to get last saved time: {}", e);
            None
        })
    }

    pub fn save_as<T: Serialize>(&self, value: &T) -> bool {
        match self.try_save_as(value) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to save data: {}", e);
                false
            }
        }
    }

    /// `None` (with a warning, not an error) when a valid record doesn't fit `T`
    pub fn load_as<T: DeserializeOwned>(&self) -> Option<T> {
        match self.try_load_as() {
            Ok(value) => value,
            Err(e @ StoreError::Convert(_)) => {
                log::warn!("Skipping typed load: {}", e);
                None
            }
            Err(e) => {
                log::error!("Failed to load data: {}", e);
                None
            }
        }
    }
}
