//! On-storage record shape
//!
//! A record is the caller's object with one extra top-level field,
//! `lastSaved`, holding the save time.

use serde_json::{Map, Value};

use super::error::{Result, StoreError, json_kind};

/// Caller-owned, schema-free payload
pub type UserData = Map<String, Value>;

/// Reserved field added at save time and stripped on load
pub const LAST_SAVED_FIELD: &str = "lastSaved";

/// Parse JSON text that must hold an object
pub fn parse_user_data(raw: &str) -> Result<UserData> {
    match serde_json::from_str::<Value>(raw).map_err(StoreError::Deserialize)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::NotAnObject(json_kind(&other))),
    }
}

/// A parsed record
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedRecord {
    pub data: UserData,
    /// `None` when the stored object has no string `lastSaved`
    pub last_saved: Option<String>,
}

impl PersistedRecord {
    /// Stamp a shallow copy of `data`. A caller-supplied `lastSaved` is
    /// replaced.
    pub fn stamp(data: &UserData, timestamp: String) -> Self {
        let mut data = data.clone();
        data.remove(LAST_SAVED_FIELD);
        Self {
            data,
            last_saved: Some(timestamp),
        }
    }

    /// Serialize to the stored JSON text
    pub fn to_json(&self) -> Result<String> {
        let mut object = self.data.clone();
        if let Some(ts) = &self.last_saved {
            object.insert(LAST_SAVED_FIELD.to_string(), Value::String(ts.clone()));
        }
        serde_json::to_string(&object).map_err(StoreError::Serialize)
    }

    /// Parse stored JSON text, splitting `lastSaved` off the user data
    pub fn from_json(raw: &str) -> Result<Self> {
        let mut data = parse_user_data(raw)?;
        let last_saved = match data.remove(LAST_SAVED_FIELD) {
            Some(Value::String(ts)) => Some(ts),
            Some(other) => {
                log::warn!("Ignoring non-string {} ({})", LAST_SAVED_FIELD, json_kind(&other));
                None
            }
            None => None,
        };
        Ok(Self { data, last_saved })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> UserData {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_stamp_adds_timestamp() {
        let data = object(json!({"budget": 100, "month": "June"}));
        let record = PersistedRecord::stamp(&data, "2024-06-01T00:00:00.000Z".into());
        let stored: Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();
        assert_eq!(
            stored,
            json!({"budget": 100, "month": "June", "lastSaved": "2024-06-01T00:00:00.000Z"})
        );
        // Caller's copy is untouched
        assert!(!data.contains_key(LAST_SAVED_FIELD));
    }

    #[test]
    fn test_stamp_replaces_caller_last_saved() {
        let data = object(json!({"lastSaved": "forged", "x": 1}));
        let record = PersistedRecord::stamp(&data, "2024-06-01T00:00:00.000Z".into());
        let parsed = PersistedRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(parsed.last_saved.as_deref(), Some("2024-06-01T00:00:00.000Z"));
        assert_eq!(parsed.data, object(json!({"x": 1})));
    }

    #[test]
    fn test_from_json_strips_last_saved() {
        let parsed =
            PersistedRecord::from_json(r#"{"a":[1,2],"lastSaved":"2024-01-01T00:00:00.000Z"}"#)
                .unwrap();
        assert_eq!(parsed.data, object(json!({"a": [1, 2]})));
        assert_eq!(parsed.last_saved.as_deref(), Some("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_from_json_without_timestamp() {
        let parsed = PersistedRecord::from_json(r#"{"a":1}"#).unwrap();
        assert_eq!(parsed.last_saved, None);

        let parsed = PersistedRecord::from_json(r#"{"a":1,"lastSaved":42}"#).unwrap();
        assert_eq!(parsed.last_saved, None);
        assert_eq!(parsed.data, object(json!({"a": 1})));
    }

    #[test]
    fn test_parse_user_data() {
        assert_eq!(
            parse_user_data(r#"{"budget":100}"#).unwrap(),
            object(json!({"budget": 100}))
        );
        assert!(matches!(parse_user_data(""), Err(StoreError::Deserialize(_))));
        assert!(matches!(
            parse_user_data("\"text\""),
            Err(StoreError::NotAnObject("a string"))
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            PersistedRecord::from_json("{not json"),
            Err(StoreError::Deserialize(_))
        ));
        assert!(matches!(
            PersistedRecord::from_json("[1,2]"),
            Err(StoreError::NotAnObject("an array"))
        ));
        assert!(matches!(
            PersistedRecord::from_json("null"),
            Err(StoreError::NotAnObject("null"))
        ));
    }
}
