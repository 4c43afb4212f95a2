use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::document;
use crate::error::CoreError;
use crate::item::ItemRecord;

/// Manual backup document: `{ timestamp, inventory }`. Round-trips are
/// lossless for every item field, including fields this library does
/// not model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backup {
    #[serde(default)]
    pub timestamp: String,
    pub inventory: Vec<ItemRecord>,
}

impl Backup {
    pub fn new(inventory: Vec<ItemRecord>) -> Self {
        Self {
            timestamp: document::stamp_now(),
            inventory,
        }
    }

    pub fn to_json_string_pretty(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CoreError::Io(format!("failed to encode backup: {e}")))
    }

    /// Parse a backup file. Any malformed input, including a missing
    /// or non-array `inventory` field, is a validation failure.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let value: JsonValue = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Validation(format!("invalid backup file: {e}")))?;
        if !value
            .get("inventory")
            .map(JsonValue::is_array)
            .unwrap_or(false)
        {
            return Err(CoreError::Validation(
                "invalid backup format: missing inventory array".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("invalid backup format: {e}")))
    }
}
