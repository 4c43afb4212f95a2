use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::catalog::ItemCatalog;
use crate::document::{self, DEFAULT_INVENTORY_KEY, InventoryLocation, LAST_UPDATED_FIELD};
use crate::error::CoreError;
use crate::item::ItemRecord;
use crate::stacks;
use crate::store::{DocumentStore, ID_FIELD, Query};

pub const BALANCE_KEY: &str = "Balance";
pub const FACTION_KEY: &str = "FactionProgression";
pub const FACTION_LEVEL_MAX: i64 = 100;

/// Currency balance record stored under `Key == "Balance"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Balance {
    #[serde(rename = "AU", default)]
    pub aurum: i64,
    #[serde(rename = "SC", default)]
    pub kmarks: i64,
    #[serde(rename = "IN", default)]
    pub insurance: i64,
}

/// Faction progression record stored under `Key == "FactionProgression"`.
/// Levels are 0-100 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FactionLevels {
    #[serde(default)]
    pub ica: i64,
    #[serde(default)]
    pub korolev: i64,
    #[serde(default)]
    pub osiris: i64,
}

impl FactionLevels {
    pub fn validate(&self) -> Result<(), CoreError> {
        for (faction, level) in [
            ("ica", self.ica),
            ("korolev", self.korolev),
            ("osiris", self.osiris),
        ] {
            if !(0..=FACTION_LEVEL_MAX).contains(&level) {
                return Err(CoreError::Validation(format!(
                    "faction level {faction}={level} is outside 0-{FACTION_LEVEL_MAX}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub item_count: usize,
    pub matched: u64,
    pub modified: u64,
}

/// The exposed operation surface over one user-data collection.
///
/// Owns an injected document store and item catalog. Every save
/// re-reads the live document's shape before writing (read-modify-write
/// against an externally-owned document; last writer wins).
#[derive(Debug)]
pub struct Editor<S: DocumentStore> {
    store: S,
    catalog: ItemCatalog,
    inventory_key: String,
}

impl<S: DocumentStore> Editor<S> {
    pub fn new(store: S, catalog: ItemCatalog) -> Self {
        Self::with_inventory_key(store, catalog, DEFAULT_INVENTORY_KEY.to_string())
    }

    pub fn with_inventory_key(store: S, catalog: ItemCatalog, inventory_key: String) -> Self {
        Self {
            store,
            catalog,
            inventory_key,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn inventory_key(&self) -> &str {
        &self.inventory_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Locate the user document that should carry the inventory,
    /// trying keyed, root-field, and `Data`-field criteria before
    /// falling back to the first document in the collection.
    pub fn find_user_document(&self) -> Result<JsonValue, CoreError> {
        let key = self.inventory_key.clone();
        if let Some(document) = self.store.find_one(&Query::KeyEquals(key.clone()))? {
            return Ok(document);
        }
        if let Some(document) = self.store.find_one(&Query::RootFieldExists(key.clone()))? {
            return Ok(document);
        }
        if let Some(document) = self.store.find_one(&Query::DataFieldExists(key))? {
            return Ok(document);
        }
        if let Some(document) = self.store.find_one(&Query::Any)? {
            warn!(
                "no document matched inventory key \"{}\"; using first available document",
                self.inventory_key
            );
            return Ok(document);
        }
        Err(CoreError::DocumentNotFound(format!(
            "no user documents found for inventory key \"{}\"",
            self.inventory_key
        )))
    }

    /// Locate, decode, and normalize the stored inventory.
    pub fn load_inventory(&self) -> Result<Vec<ItemRecord>, CoreError> {
        let document = self.find_user_document()?;
        let located = document::locate(&document, &self.inventory_key);
        if located.location == InventoryLocation::Absent {
            warn!(
                "user document carries no \"{}\" payload; treating inventory as empty",
                self.inventory_key
            );
        }
        let items = document::decode_payload(&located.payload)?;
        Ok(stacks::split_stacks(items, &self.catalog))
    }

    /// Replace the stored inventory with `items`, writing into the
    /// shape the live document currently carries. The previous payload
    /// is overwritten wholesale; no per-item diffing.
    pub fn save_inventory(&mut self, items: &[ItemRecord]) -> Result<SaveOutcome, CoreError> {
        validate_items(items)?;

        let document = self.find_user_document()?;
        let id = document_id(&document)?;
        let encoded = serde_json::to_string(items)
            .map_err(|e| CoreError::Parse(format!("failed to encode inventory: {e}")))?;
        let fields = document::write_back_fields(
            &document,
            &self.inventory_key,
            encoded,
            &document::stamp_now(),
        );

        let outcome = self.store.update_one(&id, &fields)?;
        if outcome.matched == 0 {
            return Err(CoreError::DocumentNotFound(format!(
                "user document {id} disappeared before the inventory write"
            )));
        }
        Ok(SaveOutcome {
            item_count: items.len(),
            matched: outcome.matched,
            modified: outcome.modified,
        })
    }

    pub fn load_balance(&self) -> Result<Balance, CoreError> {
        self.load_keyed_record(BALANCE_KEY)
    }

    pub fn save_balance(&mut self, balance: &Balance) -> Result<(), CoreError> {
        self.save_keyed_record(BALANCE_KEY, balance)
    }

    pub fn load_faction_levels(&self) -> Result<FactionLevels, CoreError> {
        self.load_keyed_record(FACTION_KEY)
    }

    /// Persist faction levels. Every level is validated to 0-100
    /// before any store call, so an out-of-range value leaves all
    /// three factions untouched.
    pub fn save_faction_levels(&mut self, levels: &FactionLevels) -> Result<(), CoreError> {
        levels.validate()?;
        self.save_keyed_record(FACTION_KEY, levels)
    }

    /// Add units of a base item to an in-memory inventory using the
    /// editor's catalog for stack caps.
    pub fn add_items(&self, inventory: &mut Vec<ItemRecord>, base_item_id: &str, quantity: i64) {
        stacks::add_items(inventory, base_item_id, quantity, &self.catalog);
    }

    fn load_keyed_record<T>(&self, key: &str) -> Result<T, CoreError>
    where
        T: DeserializeOwned + Default,
    {
        match self.store.find_one(&Query::KeyEquals(key.to_string()))? {
            Some(document) => decode_keyed_value(key, document.get("Value")),
            None => Ok(T::default()),
        }
    }

    fn save_keyed_record<T: Serialize>(&mut self, key: &str, record: &T) -> Result<(), CoreError> {
        let encoded = serde_json::to_string(record)
            .map_err(|e| CoreError::Parse(format!("failed to encode {key} record: {e}")))?;
        let stamp = document::stamp_now();

        match self.store.find_one(&Query::KeyEquals(key.to_string()))? {
            Some(document) => {
                let id = document_id(&document)?;
                let mut fields = JsonMap::new();
                fields.insert("Value".to_string(), JsonValue::String(encoded));
                fields.insert(LAST_UPDATED_FIELD.to_string(), JsonValue::String(stamp));
                let outcome = self.store.update_one(&id, &fields)?;
                if outcome.matched == 0 {
                    return Err(CoreError::DocumentNotFound(format!(
                        "{key} document {id} disappeared before the write"
                    )));
                }
                Ok(())
            }
            None => {
                let mut document = JsonMap::new();
                document.insert("Key".to_string(), JsonValue::String(key.to_string()));
                document.insert("Value".to_string(), JsonValue::String(encoded));
                document.insert(LAST_UPDATED_FIELD.to_string(), JsonValue::String(stamp));
                self.store.insert_one(JsonValue::Object(document))?;
                Ok(())
            }
        }
    }
}

fn decode_keyed_value<T>(key: &str, value: Option<&JsonValue>) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    match value {
        None | Some(JsonValue::Null) => Ok(T::default()),
        Some(JsonValue::String(raw)) => serde_json::from_str(raw)
            .map_err(|e| CoreError::Parse(format!("{key} record is not valid JSON: {e}"))),
        Some(object @ JsonValue::Object(_)) => serde_json::from_value(object.clone())
            .map_err(|e| CoreError::Parse(format!("{key} record is malformed: {e}"))),
        Some(_) => Err(CoreError::Parse(format!(
            "{key} record Value must be a JSON string or object"
        ))),
    }
}

fn validate_items(items: &[ItemRecord]) -> Result<(), CoreError> {
    for (index, item) in items.iter().enumerate() {
        if item.base_item_id.is_empty() {
            return Err(CoreError::Validation(format!(
                "item {index} is missing baseItemId"
            )));
        }
        if item.amount < 1 {
            return Err(CoreError::Validation(format!(
                "item {index} ({}) has non-positive amount {}",
                item.base_item_id, item.amount
            )));
        }
    }
    Ok(())
}

fn document_id(document: &JsonValue) -> Result<String, CoreError> {
    document
        .get(ID_FIELD)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            CoreError::Validation(format!("user document is missing a string {ID_FIELD} field"))
        })
}
