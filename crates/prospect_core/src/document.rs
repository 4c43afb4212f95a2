//! Inventory locator: find the inventory payload inside a
//! loosely-structured user document and write edits back to the same
//! place.
//!
//! Exactly one of four shapes holds the payload per document and they
//! are tried in a fixed priority order, first match wins. A document
//! that happens to satisfy more than one shape is not disambiguated;
//! the write-back path walks the same order, so a load/save round-trip
//! always lands in the shape the load saw.

use std::fmt;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::CoreError;
use crate::item::ItemRecord;

pub const DEFAULT_INVENTORY_KEY: &str = "Inventory";
pub const LAST_UPDATED_FIELD: &str = "LastUpdated";

const KEY_FIELD: &str = "Key";
const VALUE_FIELD: &str = "Value";
const DATA_FIELD: &str = "Data";

/// Which document shape held the inventory payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryLocation {
    /// `Key == <inventory key>` with the payload in `Value`.
    Keyed,
    /// Root field named by the inventory key, payload in its `Value`.
    RootValued,
    /// Root field named by the inventory key holding the payload directly.
    RootDirect,
    /// `Data.<inventory key>` with the payload in its `Value`.
    NestedValued,
    /// No matching shape; the payload defaults to an empty array.
    Absent,
}

impl fmt::Display for InventoryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InventoryLocation::Keyed => "keyed",
            InventoryLocation::RootValued => "root-valued",
            InventoryLocation::RootDirect => "root-direct",
            InventoryLocation::NestedValued => "nested-valued",
            InventoryLocation::Absent => "absent",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocatedPayload {
    pub location: InventoryLocation,
    pub payload: JsonValue,
}

/// Find the raw inventory payload in `document`, trying the shapes in
/// priority order.
pub fn locate(document: &JsonValue, inventory_key: &str) -> LocatedPayload {
    if document.get(KEY_FIELD).and_then(JsonValue::as_str) == Some(inventory_key)
        && let Some(value) = document.get(VALUE_FIELD).filter(|v| !v.is_null())
    {
        return LocatedPayload {
            location: InventoryLocation::Keyed,
            payload: value.clone(),
        };
    }

    if let Some(field) = document.get(inventory_key) {
        if let Some(value) = field.get(VALUE_FIELD).filter(|v| !v.is_null()) {
            return LocatedPayload {
                location: InventoryLocation::RootValued,
                payload: value.clone(),
            };
        }
        return LocatedPayload {
            location: InventoryLocation::RootDirect,
            payload: field.clone(),
        };
    }

    if let Some(value) = document
        .get(DATA_FIELD)
        .and_then(|data| data.get(inventory_key))
        .and_then(|field| field.get(VALUE_FIELD))
        .filter(|v| !v.is_null())
    {
        return LocatedPayload {
            location: InventoryLocation::NestedValued,
            payload: value.clone(),
        };
    }

    LocatedPayload {
        location: InventoryLocation::Absent,
        payload: JsonValue::Array(Vec::new()),
    }
}

/// Decode a located payload into item records.
///
/// Strings are parsed as JSON, arrays are taken directly, null decodes
/// to an empty inventory; anything else is malformed.
pub fn decode_payload(payload: &JsonValue) -> Result<Vec<ItemRecord>, CoreError> {
    match payload {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::String(raw) => {
            let decoded: JsonValue = serde_json::from_str(raw)
                .map_err(|e| CoreError::Parse(format!("inventory payload is not valid JSON: {e}")))?;
            match decoded {
                JsonValue::Array(_) => items_from_value(decoded),
                other => Err(CoreError::Parse(format!(
                    "decoded inventory payload is {}, expected an array",
                    json_type_name(&other)
                ))),
            }
        }
        JsonValue::Array(_) => items_from_value(payload.clone()),
        other => Err(CoreError::Parse(format!(
            "inventory payload is {}, expected a JSON string or array",
            json_type_name(other)
        ))),
    }
}

/// Build the `$set`-style field map that writes `encoded` (a JSON
/// string of the item sequence) back into whichever shape `document`
/// currently carries.
///
/// Objects that held the payload under `Value` keep all their sibling
/// fields; only `Value` is replaced. When no shape matches, the keyed
/// shape is created. `LastUpdated` is always stamped.
pub fn write_back_fields(
    document: &JsonValue,
    inventory_key: &str,
    encoded: String,
    stamp: &str,
) -> JsonMap<String, JsonValue> {
    let mut fields = JsonMap::new();

    if document.get(KEY_FIELD).and_then(JsonValue::as_str) == Some(inventory_key) {
        fields.insert(VALUE_FIELD.to_string(), JsonValue::String(encoded));
    } else if let Some(existing) = document.get(inventory_key) {
        if existing.get(VALUE_FIELD).is_some() {
            fields.insert(
                inventory_key.to_string(),
                merge_value_field(existing, encoded),
            );
        } else {
            fields.insert(inventory_key.to_string(), JsonValue::String(encoded));
        }
    } else if let Some(existing) = document
        .get(DATA_FIELD)
        .and_then(|data| data.get(inventory_key))
    {
        let path = format!("{DATA_FIELD}.{inventory_key}");
        if existing.get(VALUE_FIELD).is_some() {
            fields.insert(path, merge_value_field(existing, encoded));
        } else {
            fields.insert(path, JsonValue::String(encoded));
        }
    } else {
        fields.insert(
            KEY_FIELD.to_string(),
            JsonValue::String(inventory_key.to_string()),
        );
        fields.insert(VALUE_FIELD.to_string(), JsonValue::String(encoded));
    }

    fields.insert(
        LAST_UPDATED_FIELD.to_string(),
        JsonValue::String(stamp.to_string()),
    );
    fields
}

/// Current UTC time in the RFC 3339 millisecond form the store uses
/// for `LastUpdated`.
pub fn stamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn merge_value_field(existing: &JsonValue, encoded: String) -> JsonValue {
    let mut merged = existing.as_object().cloned().unwrap_or_default();
    merged.insert(VALUE_FIELD.to_string(), JsonValue::String(encoded));
    JsonValue::Object(merged)
}

fn items_from_value(value: JsonValue) -> Result<Vec<ItemRecord>, CoreError> {
    serde_json::from_value(value)
        .map_err(|e| CoreError::Parse(format!("inventory payload has malformed items: {e}")))
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
