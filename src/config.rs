//! Store configuration

use crate::consts::STORAGE_KEY;

/// Settings fixed at store construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the whole record lives under
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Config storing under a custom key
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}
