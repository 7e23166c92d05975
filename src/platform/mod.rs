//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, a JSON file natively, memory anywhere)
//! - Time (ISO-8601 timestamps)

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;
pub mod storage;
pub mod time;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileBackend;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageBackend;
pub use storage::{BackendError, KeyValueBackend, MemoryBackend};
#[cfg(test)]
pub use time::FixedClock;
pub use time::{Clock, SystemClock};
