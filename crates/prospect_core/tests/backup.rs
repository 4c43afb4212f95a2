use prospect_core::{Backup, CoreError, ItemRecord, fallback_config};
use serde_json::json;

#[test]
fn new_backups_carry_a_timestamp() {
    let backup = Backup::new(vec![ItemRecord::new_stack(
        "Nickel_Ore",
        4,
        &fallback_config("Nickel_Ore"),
    )]);

    assert!(!backup.timestamp.is_empty());
    assert!(backup.timestamp.ends_with('Z'));
}

#[test]
fn backups_round_trip_losslessly() {
    let mut item = ItemRecord::new_stack("Shield_01", 1, &fallback_config("Shield_01"));
    item.insurance = "policy-3".to_string();
    item.extra
        .insert("customTag".to_string(), json!({ "nested": [1, 2] }));
    let backup = Backup::new(vec![item]);

    let encoded = backup.to_json_string_pretty().expect("backup should encode");
    let decoded = Backup::from_json_bytes(encoded.as_bytes()).expect("backup should decode");

    assert_eq!(decoded, backup);
    assert_eq!(
        decoded.inventory[0].extra.get("customTag"),
        Some(&json!({ "nested": [1, 2] }))
    );
}

#[test]
fn backups_parse_files_written_by_other_tools() {
    let raw = json!({
        "timestamp": "2026-02-03T04:05:06.789Z",
        "inventory": [
            { "baseItemId": "Veltecite_Ore", "amount": 10 }
        ]
    });

    let backup =
        Backup::from_json_bytes(raw.to_string().as_bytes()).expect("backup should decode");
    assert_eq!(backup.timestamp, "2026-02-03T04:05:06.789Z");
    assert_eq!(backup.inventory.len(), 1);
    assert_eq!(backup.inventory[0].amount, 10);
    // Omitted fields take their defaults.
    assert_eq!(backup.inventory[0].durability, -1);
}

#[test]
fn backups_without_an_inventory_array_are_rejected() {
    for raw in [
        "{not json",
        "{\"timestamp\":\"x\"}",
        "{\"timestamp\":\"x\",\"inventory\":{}}",
        "[]",
    ] {
        let err = Backup::from_json_bytes(raw.as_bytes()).expect_err("must not decode");
        assert!(matches!(err, CoreError::Validation(_)), "input {raw}");
    }
}
