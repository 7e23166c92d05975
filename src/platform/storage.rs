//! Key-value storage backends
//!
//! The store only needs four primitives from its medium: get, set, remove and a
//! presence check. LocalStorage provides them on the web, a JSON file natively,
//! and an in-memory map everywhere (tests, scratch use).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Failure reported by a storage medium
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The medium could not be reached (no window, private mode, ...)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Writing would exceed the medium's capacity
    #[error("storage quota exceeded ({needed} bytes needed, quota {quota})")]
    QuotaExceeded { needed: usize, quota: usize },
    /// Storage has been switched off
    #[error("storage is disabled")]
    Disabled,
    /// Exception thrown by the browser storage API
    #[error("storage exception: {0}")]
    Js(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The medium's own bookkeeping is unreadable
    #[error("storage file is corrupt: {0}")]
    Corrupt(String),
}

/// Minimal capability set of a key-value store
pub trait KeyValueBackend {
    /// Read the raw value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>, BackendError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<(), BackendError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), BackendError>;

    /// Whether `key` currently holds a value. Never fails; an unreachable
    /// medium reports `false`.
    fn has(&self, key: &str) -> bool;
}

impl<B: KeyValueBackend + ?Sized> KeyValueBackend for &B {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        (**self).remove(key)
    }

    fn has(&self, key: &str) -> bool {
        (**self).has(key)
    }
}

/// In-memory backend
///
/// Can simulate the two failures browsers actually produce: a byte quota
/// (counted over keys and values, like LocalStorage) and storage disabled.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
    disabled: Cell<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that rejects writes pushing total usage past `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Toggle the disabled state (every fallible call errors while set)
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Bytes in use, excluding `skip_key`
    fn usage_without(&self, skip_key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != skip_key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_enabled(&self) -> Result<(), BackendError> {
        if self.disabled.get() {
            Err(BackendError::Disabled)
        } else {
            Ok(())
        }
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.check_enabled()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.check_enabled()?;
        if let Some(quota) = self.quota {
            let needed = self.usage_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(BackendError::QuotaExceeded { needed, quota });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.check_enabled()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn has(&self, key: &str) -> bool {
        !self.disabled.get() && self.entries.borrow().contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_set_get_remove() {
        let backend = MemoryBackend::new();
        assert!(!backend.has("k"));
        assert_eq!(backend.get("k").unwrap(), None);

        backend.set("k", "v1").unwrap();
        backend.set("k", "v2").unwrap();
        assert!(backend.has("k"));
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v2"));
        assert_eq!(backend.len(), 1);

        backend.remove("k").unwrap();
        backend.remove("k").unwrap(); // missing key is fine
        assert!(backend.is_empty());
    }

    #[test]
    fn test_memory_quota() {
        let backend = MemoryBackend::with_quota(10);
        backend.set("ab", "12345678").unwrap(); // exactly 10
        // Replacing the same key only counts the new value
        backend.set("ab", "87654321").unwrap();

        let err = backend.set("c", "x").unwrap_err();
        assert!(matches!(
            err,
            BackendError::QuotaExceeded {
                needed: 12,
                quota: 10
            }
        ));
        assert!(!backend.has("c"));
    }

    #[test]
    fn test_memory_disabled() {
        let backend = MemoryBackend::new();
        backend.set("k", "v").unwrap();
        backend.set_disabled(true);

        assert!(matches!(backend.get("k"), Err(BackendError::Disabled)));
        assert!(matches!(backend.set("k", "w"), Err(BackendError::Disabled)));
        assert!(matches!(backend.remove("k"), Err(BackendError::Disabled)));
        assert!(!backend.has("k"));

        backend.set_disabled(false);
        assert_eq!(backend.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_backend_by_reference() {
        fn write_through<B: KeyValueBackend>(backend: B) {
            backend.set("k", "v").unwrap();
        }
        let backend = MemoryBackend::new();
        write_through(&backend);
        assert!(backend.has("k"));
    }
}
