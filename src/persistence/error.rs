use crate::platform::BackendError;

/// Why a store operation failed
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("stored record is not valid JSON: {0}")]
    Deserialize(#[source] serde_json::Error),
    /// Valid record that doesn't fit the requested type
    #[error("saved data does not match the requested type: {0}")]
    Convert(#[source] serde_json::Error),
    /// Valid JSON, but not an object (or a typed value that isn't one)
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// JSON type name for error messages
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
