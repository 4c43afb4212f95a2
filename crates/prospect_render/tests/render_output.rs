use prospect_core::{Balance, FactionLevels, ItemCatalog, ItemRecord, fallback_config, resolve_items};
use prospect_render::{
    JsonStyle, TextStyle, render_json_balance, render_json_factions, render_json_inventory,
    render_stash_sheet,
};
use serde_json::json;

fn resolved_stack(base_item_id: &str, amount: i64) -> Vec<prospect_core::ResolvedItemEntry> {
    let item = ItemRecord::new_stack(base_item_id, amount, &fallback_config(base_item_id));
    resolve_items(&ItemCatalog::empty(), &[item])
}

#[test]
fn json_inventory_carries_resolved_fields() {
    let rendered = render_json_inventory(&resolved_stack("Light_Ammo", 120), JsonStyle::CanonicalV1);

    assert_eq!(
        rendered,
        json!([{
            "baseItemId": "Light_Ammo",
            "displayName": "Light Ammo",
            "category": "ammo",
            "rarity": "common",
            "rarityColor": "#9e9e9e",
            "amount": 120,
            "durability": -1,
            "maxStackSize": 250
        }])
    );
}

#[test]
fn json_inventory_substitutes_the_default_rarity_color() {
    let mut entries = resolved_stack("Light_Ammo", 1);
    entries[0].rarity_color = None;

    let rendered = render_json_inventory(&entries, JsonStyle::CanonicalV1);
    assert_eq!(rendered[0]["rarityColor"], json!("#64ffda"));
}

#[test]
fn json_balance_and_factions_use_wire_field_names() {
    let balance = render_json_balance(
        &Balance {
            aurum: 5000,
            kmarks: 100,
            insurance: 2,
        },
        JsonStyle::CanonicalV1,
    );
    assert_eq!(balance, json!({ "AU": 5000, "SC": 100, "IN": 2 }));

    let factions = render_json_factions(
        &FactionLevels {
            ica: 1,
            korolev: 2,
            osiris: 3,
        },
        JsonStyle::CanonicalV1,
    );
    assert_eq!(factions, json!({ "ica": 1, "korolev": 2, "osiris": 3 }));
}

#[test]
fn stash_sheet_lists_rows_and_totals() {
    let mut entries = resolved_stack("Light_Ammo", 120);
    entries.extend(resolved_stack("Nickel_Ore", 30));

    let sheet = render_stash_sheet(&entries, TextStyle::StashSheet);
    let lines: Vec<&str> = sheet.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Item"));
    assert!(lines[1].contains("Light Ammo"));
    assert!(lines[1].contains("Light_Ammo"));
    assert!(lines[2].contains("Nickel Ore"));
    assert_eq!(lines[3], "2 stacks, 150 units total");
}

#[test]
fn stash_sheet_labels_durability_states() {
    // Full sentinel.
    let full = resolved_stack("Nickel_Ore", 1);
    let sheet = render_stash_sheet(&full, TextStyle::StashSheet);
    assert!(sheet.contains("full"));

    // Bounded durability renders as cur/max.
    let mut worn = resolved_stack("Shield_01", 1);
    worn[0].durability = 320;
    let sheet = render_stash_sheet(&worn, TextStyle::StashSheet);
    assert!(sheet.contains("320/500"));
}

#[test]
fn stash_sheet_handles_an_empty_inventory() {
    let sheet = render_stash_sheet(&[], TextStyle::StashSheet);
    let lines: Vec<&str> = sheet.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "0 stacks, 0 units total");
}
