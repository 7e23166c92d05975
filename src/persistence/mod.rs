//! Save/load of the planner's inputs
//!
//! Features:
//! - One JSON record under one key, overwritten on every save
//! - `lastSaved` timestamp stamped on save, stripped on load
//! - Total API (bool/Option + log line) over a fallible `try_*` API

pub mod error;
pub mod record;
pub mod store;

pub use error::{Result, StoreError};
pub use record::{LAST_SAVED_FIELD, PersistedRecord, UserData, parse_user_data};
pub use store::StorageStore;
