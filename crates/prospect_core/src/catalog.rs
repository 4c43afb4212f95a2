//! Item metadata resolution.
//!
//! Configs normally come from the remote catalog document
//! (`itemConfigs` keyed by base item id plus `rarityColors`). When the
//! catalog has no entry for an id, a deterministic fallback config is
//! derived from the id string itself. The substring tables below are a
//! frozen compatibility shim reverse-engineered from shipped data; do
//! not "improve" them without checking existing databases.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::CoreError;
use crate::item::{DURABILITY_FULL, ItemRecord};

/// Stack limit applied when a config omits `maxStackSize` or sets it
/// to a non-positive value.
pub const DEFAULT_STACK_LIMIT: i64 = 50;
/// Stack limit for the legacy currency items.
pub const UNLIMITED_STACK: i64 = 999_999;

pub const RARITY_COMMON: &str = "common";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemConfig {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default = "default_max_durability")]
    pub max_durability: i64,
    #[serde(default)]
    pub max_stack_size: i64,
    #[serde(default)]
    pub icon: String,
}

fn default_max_durability() -> i64 {
    DURABILITY_FULL
}

/// Wire shape of the remote catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogDocument {
    #[serde(rename = "itemConfigs", default)]
    item_configs: BTreeMap<String, ItemConfig>,
    #[serde(rename = "rarityColors", default)]
    rarity_colors: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemCatalog {
    entries: BTreeMap<String, ItemConfig>,
    rarity_colors: BTreeMap<String, String>,
}

impl ItemCatalog {
    /// Catalog with no remote entries; every lookup falls back to the
    /// heuristic derivation. Rarity colors keep the shipped defaults so
    /// rendering stays usable offline.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
            rarity_colors: fallback_rarity_colors(),
        }
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let document: CatalogDocument = serde_json::from_slice(bytes)
            .map_err(|e| CoreError::Parse(format!("malformed item catalog document: {e}")))?;
        Ok(Self {
            entries: document.item_configs,
            rarity_colors: document.rarity_colors,
        })
    }

    pub fn from_value(value: JsonValue) -> Result<Self, CoreError> {
        let document: CatalogDocument = serde_json::from_value(value)
            .map_err(|e| CoreError::Parse(format!("malformed item catalog document: {e}")))?;
        Ok(Self {
            entries: document.item_configs,
            rarity_colors: document.rarity_colors,
        })
    }

    pub fn get(&self, base_item_id: &str) -> Option<&ItemConfig> {
        self.entries.get(base_item_id)
    }

    /// Resolved config for an id: the catalog entry when present,
    /// otherwise the derived fallback.
    pub fn config_for(&self, base_item_id: &str) -> ItemConfig {
        self.entries
            .get(base_item_id)
            .cloned()
            .unwrap_or_else(|| fallback_config(base_item_id))
    }

    /// Effective per-stack cap for an id, never less than 1.
    pub fn stack_limit_for(&self, base_item_id: &str) -> i64 {
        effective_stack_limit(self.config_for(base_item_id).max_stack_size)
    }

    pub fn rarity_color(&self, rarity: &str) -> Option<&str> {
        self.rarity_colors.get(rarity).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn effective_stack_limit(max_stack_size: i64) -> i64 {
    if max_stack_size <= 0 {
        DEFAULT_STACK_LIMIT
    } else {
        max_stack_size
    }
}

pub fn fallback_config(base_item_id: &str) -> ItemConfig {
    ItemConfig {
        display_name: clean_display_name(base_item_id),
        category: guess_category(base_item_id).to_string(),
        rarity: RARITY_COMMON.to_string(),
        max_durability: guess_max_durability(base_item_id),
        max_stack_size: guess_max_stack_size(base_item_id),
        icon: default_icon(base_item_id),
    }
}

pub fn guess_category(base_item_id: &str) -> &'static str {
    let id = base_item_id.to_ascii_lowercase();
    if id.contains("wp_") {
        return "weapons";
    }
    if id.contains("consumable") {
        return "consumables";
    }
    if ["shield", "helmet", "bag", "vest"].iter().any(|s| id.contains(s)) {
        return "armor";
    }
    if ["light", "medium", "heavy", "shotgun", "special"]
        .iter()
        .any(|s| id.contains(s))
    {
        return "ammo";
    }
    if id.contains("tool") || id.contains("scanner") {
        return "tools";
    }
    if id.contains("mod_") {
        return "attachments";
    }
    "materials"
}

pub fn guess_max_durability(base_item_id: &str) -> i64 {
    let id = base_item_id.to_ascii_lowercase();
    if id.contains("wp_") {
        return 1000;
    }
    if id.contains("helmet") {
        return 600;
    }
    if id.contains("shield") {
        return 500;
    }
    if id.contains("vest") {
        return 400;
    }
    if id.contains("tool") || id.contains("scanner") {
        return 500;
    }
    DURABILITY_FULL
}

pub fn guess_max_stack_size(base_item_id: &str) -> i64 {
    let id = base_item_id.to_ascii_lowercase();
    if id.contains("oldcurrency") || id.contains("old_currency") {
        return UNLIMITED_STACK;
    }
    if id.contains("consumable") || id.contains("grenade") {
        return 5;
    }
    if ["light", "medium", "heavy", "shotgun", "special"]
        .iter()
        .any(|s| id.contains(s))
    {
        return 250;
    }
    if ["veltecite", "nickel", "materials"].iter().any(|s| id.contains(s)) {
        return 100;
    }
    if ["wp_", "helmet", "shield", "bag", "vest"].iter().any(|s| id.contains(s)) {
        return 1;
    }
    20
}

/// Human-readable name derived from an id: known prefixes stripped,
/// underscores flattened, words title-cased.
pub fn clean_display_name(base_item_id: &str) -> String {
    let stripped = strip_known_prefix(base_item_id);
    stripped
        .split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn default_icon(base_item_id: &str) -> String {
    let prefix: String = base_item_id.chars().take(8).collect();
    format!("{prefix}.png")
}

fn strip_known_prefix(name: &str) -> &str {
    // Weapon ids look like WP_<letter>_Rest; only that exact shape is
    // stripped.
    if let Some(rest) = name.strip_prefix("WP_") {
        let bytes = rest.as_bytes();
        if bytes.len() > 2 && bytes[0].is_ascii_uppercase() && bytes[1] == b'_' {
            return &rest[2..];
        }
        return name;
    }
    for prefix in ["TOOL_", "Mod_", "Consumable_"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            return rest;
        }
    }
    name
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
        }
        None => String::new(),
    }
}

fn fallback_rarity_colors() -> BTreeMap<String, String> {
    [
        ("common", "#9e9e9e"),
        ("uncommon", "#4caf50"),
        ("rare", "#2196f3"),
        ("epic", "#9c27b0"),
        ("exotic", "#ff4e4e"),
        ("legendary", "#ff9800"),
    ]
    .iter()
    .map(|(rarity, color)| (rarity.to_string(), color.to_string()))
    .collect()
}

/// Display-oriented view of one stack with its config resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItemEntry {
    pub base_item_id: String,
    pub display_name: String,
    pub category: String,
    pub rarity: String,
    pub rarity_color: Option<String>,
    pub amount: i64,
    pub durability: i64,
    pub max_durability: i64,
    pub max_stack_size: i64,
}

pub fn resolve_items(catalog: &ItemCatalog, items: &[ItemRecord]) -> Vec<ResolvedItemEntry> {
    items
        .iter()
        .map(|item| {
            let config = catalog.config_for(&item.base_item_id);
            ResolvedItemEntry {
                base_item_id: item.base_item_id.clone(),
                display_name: config.display_name.clone(),
                category: config.category.clone(),
                rarity_color: catalog.rarity_color(&config.rarity).map(str::to_string),
                rarity: config.rarity,
                amount: item.amount,
                durability: item.durability,
                max_durability: config.max_durability,
                max_stack_size: effective_stack_limit(config.max_stack_size),
            }
        })
        .collect()
}
