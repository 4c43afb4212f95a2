use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use uuid::Uuid;

use crate::catalog::ItemConfig;

/// Durability sentinel meaning "full / unused".
pub const DURABILITY_FULL: i64 = -1;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "baseItemId", default)]
    pub base_item_id: String,
    #[serde(default)]
    pub amount: i64,
}

/// Attachment payload carried by an item. The wire name of the
/// attachment list is the single letter `m`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModData {
    #[serde(rename = "m", default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default)]
    pub t: String,
    #[serde(default)]
    pub p: String,
    #[serde(default)]
    pub g: String,
}

/// One stack of a base item as stored in the user-data payload.
///
/// `item_id` is unique per stack and minted by this library whenever a
/// stack is created or split; `base_item_id` identifies the catalog
/// item type and is never unique. Fields not modeled here survive
/// round-trips through the flattened `extra` map, so re-encoding a
/// payload loses nothing the game put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(default)]
    pub item_id: String,
    #[serde(default)]
    pub base_item_id: String,
    #[serde(default)]
    pub primary_vanity_id: i64,
    #[serde(default)]
    pub secondary_vanity_id: i64,
    #[serde(default = "default_amount")]
    pub amount: i64,
    #[serde(default = "default_durability")]
    pub durability: i64,
    #[serde(default)]
    pub mod_data: ModData,
    #[serde(default)]
    pub rolled_perks: Vec<JsonValue>,
    #[serde(default)]
    pub insurance: String,
    #[serde(default)]
    pub insurance_owner_playfab_id: String,
    #[serde(default)]
    pub insured_attachment_id: String,
    #[serde(default)]
    pub origin: Origin,
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl ItemRecord {
    /// Create a brand-new stack of `amount` units with defaults taken
    /// from the resolved config (durability starts at the item's cap).
    pub fn new_stack(base_item_id: &str, amount: i64, config: &ItemConfig) -> Self {
        Self {
            item_id: Uuid::new_v4().to_string(),
            base_item_id: base_item_id.to_string(),
            primary_vanity_id: 0,
            secondary_vanity_id: 0,
            amount,
            durability: config.max_durability,
            mod_data: ModData::default(),
            rolled_perks: Vec::new(),
            insurance: String::new(),
            insurance_owner_playfab_id: String::new(),
            insured_attachment_id: String::new(),
            origin: Origin::default(),
            extra: JsonMap::new(),
        }
    }

    /// Copy of this record carrying `amount` units and a freshly minted
    /// `item_id`; every other field (including `extra`) is preserved.
    pub fn with_fresh_id(&self, amount: i64) -> Self {
        let mut copy = self.clone();
        copy.item_id = Uuid::new_v4().to_string();
        copy.amount = amount;
        copy
    }
}

fn default_amount() -> i64 {
    1
}

fn default_durability() -> i64 {
    DURABILITY_FULL
}
