//! Shared JSON and text rendering for Prospect save data. Output is
//! deterministic so CLI tests can assert on it directly.

use std::fmt::Write as _;

use prospect_core::{Balance, DURABILITY_FULL, FactionLevels, ResolvedItemEntry};
use serde_json::{Map as JsonMap, Value as JsonValue};

const SHEET_NAME_WIDTH: usize = 26;
const SHEET_ID_WIDTH: usize = 30;
const SHEET_AMOUNT_WIDTH: usize = 8;
const SHEET_DURABILITY_WIDTH: usize = 12;
const DEFAULT_RARITY_COLOR: &str = "#64ffda";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextStyle {
    #[default]
    StashSheet,
}

pub fn render_json_inventory(items: &[ResolvedItemEntry], style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Array(items.iter().map(item_json).collect()),
    }
}

pub fn render_json_balance(balance: &Balance, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut out = JsonMap::new();
            out.insert("AU".to_string(), JsonValue::from(balance.aurum));
            out.insert("SC".to_string(), JsonValue::from(balance.kmarks));
            out.insert("IN".to_string(), JsonValue::from(balance.insurance));
            JsonValue::Object(out)
        }
    }
}

pub fn render_json_factions(levels: &FactionLevels, style: JsonStyle) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => {
            let mut out = JsonMap::new();
            out.insert("ica".to_string(), JsonValue::from(levels.ica));
            out.insert("korolev".to_string(), JsonValue::from(levels.korolev));
            out.insert("osiris".to_string(), JsonValue::from(levels.osiris));
            JsonValue::Object(out)
        }
    }
}

/// Fixed-width stash listing: one row per stack, then a totals line.
pub fn render_stash_sheet(items: &[ResolvedItemEntry], style: TextStyle) -> String {
    match style {
        TextStyle::StashSheet => stash_sheet(items),
    }
}

fn item_json(item: &ResolvedItemEntry) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "baseItemId".to_string(),
        JsonValue::String(item.base_item_id.clone()),
    );
    out.insert(
        "displayName".to_string(),
        JsonValue::String(item.display_name.clone()),
    );
    out.insert(
        "category".to_string(),
        JsonValue::String(item.category.clone()),
    );
    out.insert("rarity".to_string(), JsonValue::String(item.rarity.clone()));
    out.insert(
        "rarityColor".to_string(),
        JsonValue::String(
            item.rarity_color
                .clone()
                .unwrap_or_else(|| DEFAULT_RARITY_COLOR.to_string()),
        ),
    );
    out.insert("amount".to_string(), JsonValue::from(item.amount));
    out.insert("durability".to_string(), JsonValue::from(item.durability));
    out.insert(
        "maxStackSize".to_string(),
        JsonValue::from(item.max_stack_size),
    );
    JsonValue::Object(out)
}

fn stash_sheet(items: &[ResolvedItemEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<name$} {:<id$} {:>amount$} {:>durability$} {}",
        "Item",
        "Base Item ID",
        "Amount",
        "Durability",
        "Rarity",
        name = SHEET_NAME_WIDTH,
        id = SHEET_ID_WIDTH,
        amount = SHEET_AMOUNT_WIDTH,
        durability = SHEET_DURABILITY_WIDTH,
    );

    let mut total_units: i64 = 0;
    for item in items {
        total_units += item.amount;
        let _ = writeln!(
            out,
            "{:<name$} {:<id$} {:>amount$} {:>durability$} {}",
            truncate(&item.display_name, SHEET_NAME_WIDTH),
            truncate(&item.base_item_id, SHEET_ID_WIDTH),
            item.amount,
            durability_label(item),
            item.rarity,
            name = SHEET_NAME_WIDTH,
            id = SHEET_ID_WIDTH,
            amount = SHEET_AMOUNT_WIDTH,
            durability = SHEET_DURABILITY_WIDTH,
        );
    }

    let _ = writeln!(
        out,
        "{} stacks, {} units total",
        items.len(),
        total_units
    );
    out
}

fn durability_label(item: &ResolvedItemEntry) -> String {
    if item.durability == DURABILITY_FULL {
        return "full".to_string();
    }
    if item.max_durability > 0 {
        return format!("{}/{}", item.durability, item.max_durability);
    }
    item.durability.to_string()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    text.chars().take(width.saturating_sub(1)).collect::<String>() + "…"
}
