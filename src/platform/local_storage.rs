//! Browser LocalStorage backend (wasm32 only)

use wasm_bindgen::{JsCast, JsValue};
use web_sys::Storage;

use super::storage::{BackendError, KeyValueBackend};

/// `window.localStorage`
pub struct LocalStorageBackend {
    storage: Storage,
}

impl LocalStorageBackend {
    /// Acquire the origin's LocalStorage
    pub fn new() -> Result<Self, BackendError> {
        let window = web_sys::window()
            .ok_or_else(|| BackendError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| BackendError::Unavailable("localStorage is null".to_string()))?;
        Ok(Self { storage })
    }

    pub fn from_storage(storage: Storage) -> Self {
        Self { storage }
    }
}

/// Browsers throw a DOMException (QuotaExceededError, SecurityError, ...)
fn js_error(err: JsValue) -> BackendError {
    let message = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .unwrap_or_else(|| format!("{:?}", err));
    BackendError::Js(message)
}

impl KeyValueBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BackendError> {
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), BackendError> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn has(&self, key: &str) -> bool {
        matches!(self.storage.get_item(key), Ok(Some(_)))
    }
}
