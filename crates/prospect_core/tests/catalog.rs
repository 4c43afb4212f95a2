use prospect_core::catalog::{
    DEFAULT_STACK_LIMIT, UNLIMITED_STACK, clean_display_name, default_icon, guess_category,
    guess_max_durability, guess_max_stack_size,
};
use prospect_core::{
    CoreError, ItemCatalog, ItemRecord, effective_stack_limit, fallback_config, resolve_items,
};
use serde_json::json;

#[test]
fn fallback_table_covers_weapons() {
    let config = fallback_config("WP_E_AR_Energy_01");
    assert_eq!(config.category, "weapons");
    assert_eq!(config.max_stack_size, 1);
    assert_eq!(config.max_durability, 1000);
    assert_eq!(config.rarity, "common");
}

#[test]
fn fallback_table_covers_consumables() {
    let config = fallback_config("Consumable_Health_01");
    assert_eq!(config.category, "consumables");
    assert_eq!(config.max_stack_size, 5);
    assert_eq!(config.max_durability, -1);
}

#[test]
fn fallback_table_covers_armor_pieces() {
    for (id, durability) in [
        ("Shield_01", 500),
        ("Helmet_02", 600),
        ("Vest_01", 400),
        ("Bag_01", -1),
    ] {
        let config = fallback_config(id);
        assert_eq!(config.category, "armor", "{id}");
        assert_eq!(config.max_stack_size, 1, "{id}");
        assert_eq!(config.max_durability, durability, "{id}");
    }
}

#[test]
fn fallback_table_covers_ammo_calibers() {
    for id in [
        "Light_Ammo",
        "Medium_Ammo",
        "Heavy_Ammo",
        "Shotgun_Ammo",
        "Special_Ammo",
    ] {
        let config = fallback_config(id);
        assert_eq!(config.category, "ammo", "{id}");
        assert_eq!(config.max_stack_size, 250, "{id}");
    }
}

#[test]
fn fallback_table_covers_tools_and_attachments() {
    let tool = fallback_config("TOOL_Scanner_01");
    assert_eq!(tool.category, "tools");
    assert_eq!(tool.max_stack_size, 20);
    assert_eq!(tool.max_durability, 500);

    let attachment = fallback_config("Mod_Scope_01");
    assert_eq!(attachment.category, "attachments");
    assert_eq!(attachment.max_stack_size, 20);
    assert_eq!(attachment.max_durability, -1);
}

#[test]
fn fallback_table_covers_materials_and_currency() {
    let ore = fallback_config("Veltecite_Ore");
    assert_eq!(ore.category, "materials");
    assert_eq!(ore.max_stack_size, 100);

    assert_eq!(guess_max_stack_size("Nickel_Ore"), 100);
    assert_eq!(guess_max_stack_size("OldCurrency"), UNLIMITED_STACK);
    assert_eq!(guess_max_stack_size("Old_Currency_Stash"), UNLIMITED_STACK);

    let unknown = fallback_config("Mystery_Thing");
    assert_eq!(unknown.category, "materials");
    assert_eq!(unknown.max_stack_size, 20);
    assert_eq!(unknown.max_durability, -1);
}

#[test]
fn fallback_matching_is_case_insensitive() {
    assert_eq!(guess_category("wp_d_smg_01"), "weapons");
    assert_eq!(guess_category("CONSUMABLE_STIM"), "consumables");
    assert_eq!(guess_max_durability("helmet_rusted"), 600);
}

#[test]
fn clean_display_name_strips_known_prefixes() {
    assert_eq!(clean_display_name("WP_E_AR_Energy_01"), "Ar Energy 01");
    assert_eq!(clean_display_name("Consumable_Health_01"), "Health 01");
    assert_eq!(clean_display_name("TOOL_Scanner"), "Scanner");
    assert_eq!(clean_display_name("Mod_Scope_Long"), "Scope Long");
    assert_eq!(clean_display_name("veltecite_ore"), "Veltecite Ore");
}

#[test]
fn clean_display_name_leaves_unshaped_weapon_ids_alone() {
    // Only WP_<letter>_ prefixes are stripped.
    assert_eq!(clean_display_name("WP_Longname_01"), "Wp Longname 01");
}

#[test]
fn default_icon_uses_the_id_prefix() {
    assert_eq!(default_icon("WP_E_AR_Energy_01"), "WP_E_AR_.png");
    assert_eq!(default_icon("Bag"), "Bag.png");
}

#[test]
fn effective_stack_limit_defaults_non_positive_caps() {
    assert_eq!(effective_stack_limit(0), DEFAULT_STACK_LIMIT);
    assert_eq!(effective_stack_limit(-3), DEFAULT_STACK_LIMIT);
    assert_eq!(effective_stack_limit(12), 12);
}

#[test]
fn catalog_entries_override_the_fallback() {
    let catalog = ItemCatalog::from_value(json!({
        "itemConfigs": {
            "Veltecite_Ore": {
                "displayName": "Veltecite",
                "category": "minerals",
                "rarity": "rare",
                "maxStackSize": 25
            }
        },
        "rarityColors": { "rare": "#123456" }
    }))
    .expect("catalog should parse");

    let config = catalog.config_for("Veltecite_Ore");
    assert_eq!(config.display_name, "Veltecite");
    assert_eq!(config.category, "minerals");
    assert_eq!(catalog.stack_limit_for("Veltecite_Ore"), 25);
    assert_eq!(catalog.rarity_color("rare"), Some("#123456"));

    // Ids the catalog does not carry still resolve heuristically.
    assert_eq!(catalog.config_for("Shield_01").category, "armor");
}

#[test]
fn catalog_entry_without_cap_falls_back_to_default_limit() {
    let catalog = ItemCatalog::from_value(json!({
        "itemConfigs": { "Crate_Key": { "displayName": "Crate Key" } }
    }))
    .expect("catalog should parse");

    assert_eq!(catalog.stack_limit_for("Crate_Key"), DEFAULT_STACK_LIMIT);
}

#[test]
fn empty_catalog_keeps_shipped_rarity_colors() {
    let catalog = ItemCatalog::empty();
    assert!(catalog.is_empty());
    assert_eq!(catalog.rarity_color("common"), Some("#9e9e9e"));
    assert_eq!(catalog.rarity_color("legendary"), Some("#ff9800"));
    assert_eq!(catalog.rarity_color("mythic"), None);
}

#[test]
fn malformed_catalog_document_is_a_parse_error() {
    let err = ItemCatalog::from_json_bytes(b"{not json").expect_err("must not parse");
    assert!(matches!(err, CoreError::Parse(_)));
}

#[test]
fn resolve_items_attaches_config_and_color() {
    let catalog = ItemCatalog::empty();
    let item = ItemRecord::new_stack("Light_Ammo", 120, &fallback_config("Light_Ammo"));

    let resolved = resolve_items(&catalog, &[item]);

    assert_eq!(resolved.len(), 1);
    let entry = &resolved[0];
    assert_eq!(entry.base_item_id, "Light_Ammo");
    assert_eq!(entry.display_name, "Light Ammo");
    assert_eq!(entry.category, "ammo");
    assert_eq!(entry.rarity, "common");
    assert_eq!(entry.rarity_color.as_deref(), Some("#9e9e9e"));
    assert_eq!(entry.amount, 120);
    assert_eq!(entry.max_stack_size, 250);
}
