//! JavaScript bindings (wasm32 only)
//!
//! Same surface the planner page's storage service exposes, so it can call
//! `saveData(obj)`, `loadData()`, etc. Objects cross the boundary through
//! `JSON.stringify` / `JSON.parse`.

use wasm_bindgen::prelude::*;

use crate::persistence::{StorageStore, UserData, parse_user_data};
use crate::platform::LocalStorageBackend;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already initialized when the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
}

fn store() -> Option<StorageStore<LocalStorageBackend>> {
    match StorageStore::local() {
        Ok(store) => Some(store),
        Err(e) => {
            log::error!("LocalStorage unavailable: {}", e);
            None
        }
    }
}

fn to_user_data(value: &JsValue) -> Option<UserData> {
    // Throws on cycles and BigInt; yields undefined for undefined/functions
    let json = match js_sys::JSON::stringify(value) {
        Ok(json) => json.as_string(),
        Err(e) => {
            log::error!("Failed to save data: {:?}", e);
            return None;
        }
    };
    let Some(json) = json else {
        log::error!("Failed to save data: value is not JSON-serializable");
        return None;
    };
    match parse_user_data(&json) {
        Ok(data) => Some(data),
        Err(e) => {
            log::error!("Failed to save data: {}", e);
            None
        }
    }
}

/// Save user inputs; `false` if they could not be stored
#[wasm_bindgen(js_name = saveData)]
pub fn save_data(data: JsValue) -> bool {
    let Some(data) = to_user_data(&data) else {
        return false;
    };
    store().is_some_and(|store| store.save(&data))
}

/// Saved user inputs, or `null` if none (or unreadable)
#[wasm_bindgen(js_name = loadData)]
pub fn load_data() -> JsValue {
    let Some(data) = store().and_then(|store| store.load()) else {
        return JsValue::NULL;
    };
    serde_json::to_string(&data)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

#[wasm_bindgen(js_name = clearData)]
pub fn clear_data() -> bool {
    store().is_some_and(|store| store.clear())
}

#[wasm_bindgen(js_name = hasSavedData)]
pub fn has_saved_data() -> bool {
    store().is_some_and(|store| store.has_saved_data())
}

/// ISO timestamp of the last save, or `null`
#[wasm_bindgen(js_name = getLastSavedTime)]
pub fn get_last_saved_time() -> JsValue {
    store()
        .and_then(|store| store.get_last_saved_time())
        .map_or(JsValue::NULL, |ts| JsValue::from_str(&ts))
}
