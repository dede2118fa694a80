//! Tracked value fields
//!
//! The backend stores free-text fields such as PO numbers, quotations and
//! remarks as `{value, isEdited, updatedAt}`. The metadata is display-only:
//! clients overwrite `value` and stamp the other two locally before
//! submission. There is no merge logic; the server copy wins on re-fetch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedValue {
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub is_edited: bool,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TrackedValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_edited: false,
            updated_at: None,
        }
    }

    /// Overwrite the value and stamp the edit metadata. A no-op when the
    /// new value equals the current one, so opening and closing an edit
    /// form without typing leaves the record untouched.
    pub fn set(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value == self.value {
            return;
        }
        self.value = value;
        self.is_edited = true;
        self.updated_at = Some(Utc::now());
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl From<&str> for TrackedValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_stamps_edit_metadata() {
        let mut field = TrackedValue::new("PO-1001");
        assert!(!field.is_edited);
        assert!(field.updated_at.is_none());

        field.set("PO-1002");
        assert_eq!(field.value, "PO-1002");
        assert!(field.is_edited);
        assert!(field.updated_at.is_some());
    }

    #[test]
    fn set_with_same_value_is_a_noop() {
        let mut field = TrackedValue::new("PO-1001");
        field.set("PO-1001");
        assert!(!field.is_edited);
        assert!(field.updated_at.is_none());
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(TrackedValue::new("Q-77")).unwrap();
        assert_eq!(json["value"], "Q-77");
        assert_eq!(json["isEdited"], false);
        assert!(json["updatedAt"].is_null());
    }

    #[test]
    fn deserializes_from_sparse_payload() {
        let field: TrackedValue = serde_json::from_str(r#"{"value":"DC-3"}"#).unwrap();
        assert_eq!(field.value, "DC-3");
        assert!(!field.is_edited);
    }
}
