//! Power Bill Store - persistence for the power bill planner
//!
//! Core modules:
//! - `persistence`: Single-record save/load with a `lastSaved` stamp
//! - `platform`: Storage backends (LocalStorage, JSON file, memory) and clock
//! - `config`: Store configuration
//! - `planner`: Typed view of the planner's inputs
//! - `web`: JavaScript bindings (wasm32 only)

pub mod config;
pub mod persistence;
pub mod planner;
pub mod platform;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::StoreConfig;
pub use persistence::{PersistedRecord, StorageStore, StoreError, UserData};
pub use planner::PlannerInputs;

/// Store constants
pub mod consts {
    /// Key the planner's record is stored under
    pub const STORAGE_KEY: &str = "power-bill-planner-data";
}
