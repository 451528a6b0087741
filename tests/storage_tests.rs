// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde_json::{Value, json};
use tempfile::{TempDir, tempdir};
use tracker::models::{Expense, ExpensePatch};
use tracker::storage::{ExpenseStore, JsonFileStore};

fn setup() -> (JsonFileStore, TempDir) {
    let dir = tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("data").join("expenses.json")).unwrap();
    (store, dir)
}

fn read_json(store: &JsonFileStore) -> Value {
    let raw = std::fs::read_to_string(store.path()).unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn expense(id: &str, amount: Decimal) -> Expense {
    Expense {
        id: id.into(),
        date: "2024-01-15".into(),
        category: "food".into(),
        amount,
        currency: "BDT".into(),
        note: "lunch".into(),
        created_at: "2024-01-15 12:00:00".into(),
    }
}

#[test]
fn open_creates_empty_document() {
    let (store, _dir) = setup();
    assert!(store.path().exists());
    assert_eq!(read_json(&store), json!({"version": 1, "expenses": []}));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn open_leaves_existing_file_alone() {
    let (store, _dir) = setup();
    store.add(expense("EXP-20240115-0001", Decimal::new(1250, 2))).unwrap();
    let reopened = JsonFileStore::open(store.path()).unwrap();
    assert_eq!(reopened.load_all().unwrap().len(), 1);
}

#[test]
fn missing_file_reinitialises() {
    let (store, _dir) = setup();
    std::fs::remove_file(store.path()).unwrap();
    assert!(store.load_all().unwrap().is_empty());
    assert_eq!(read_json(&store), json!({"version": 1, "expenses": []}));
}

#[test]
fn corrupt_file_is_reported_with_path() {
    let (store, _dir) = setup();
    std::fs::write(
        store.path(),
        r#"{"version": 1, "expenses": [{"id": "EXP-2024"#,
    )
    .unwrap();
    let err = store.load_all().unwrap_err();
    assert!(err.is_corrupt_data());
    assert!(err.to_string().contains("expenses.json"));

    // Never auto-repaired.
    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.ends_with("EXP-2024"));
}

#[test]
fn wrong_shape_is_corrupt() {
    let (store, _dir) = setup();
    std::fs::write(store.path(), r#"{"version": 1, "expenses": [{"id": 3}]}"#).unwrap();
    assert!(store.load_all().unwrap_err().is_corrupt_data());
}

#[test]
fn optional_fields_get_defaults() {
    let (store, _dir) = setup();
    std::fs::write(
        store.path(),
        r#"{"version": 1, "expenses": [
            {"id": "EXP-20240115-0001", "date": "2024-01-15", "category": "food", "amount": 12.5}
        ]}"#,
    )
    .unwrap();
    let all = store.load_all().unwrap();
    assert_eq!(all[0].currency, "BDT");
    assert_eq!(all[0].note, "");
    assert_eq!(all[0].created_at, "");
    assert_eq!(all[0].amount, Decimal::new(125, 1));

    std::fs::write(store.path(), r#"{"version": 1}"#).unwrap();
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn save_of_load_keeps_content() {
    let (store, _dir) = setup();
    let doc = json!({
        "version": 1,
        "expenses": [
            {"id": "EXP-20240115-0001", "date": "2024-01-15", "category": "food",
             "amount": 12.5, "currency": "BDT", "note": "rice", "created_at": "2024-01-15 09:00:00"},
            {"id": "EXP-20240116-0001", "date": "2024-01-16", "category": "rent",
             "amount": 20.0, "currency": "USD", "note": "", "created_at": "2024-01-16 10:30:00"}
        ]
    });
    std::fs::write(store.path(), serde_json::to_string(&doc).unwrap()).unwrap();

    let all = store.load_all().unwrap();
    store.save_all(&all).unwrap();
    assert_eq!(read_json(&store), doc);
}

#[test]
fn amount_is_stored_as_number() {
    let (store, _dir) = setup();
    store.add(expense("EXP-20240115-0001", Decimal::new(725, 2))).unwrap();
    let v = read_json(&store);
    assert_eq!(v["expenses"][0]["amount"], json!(7.25));
}

#[test]
fn delete_missing_id_leaves_file_untouched() {
    let (store, _dir) = setup();
    store.add(expense("EXP-20240115-0001", Decimal::new(10, 0))).unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    assert!(!store.delete("EXP-19990101-0001").unwrap());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);

    assert!(store.delete("EXP-20240115-0001").unwrap());
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn update_applies_only_given_fields() {
    let (store, _dir) = setup();
    store.add(expense("EXP-20240115-0001", Decimal::new(10, 0))).unwrap();

    let patch = ExpensePatch {
        amount: Some(Decimal::new(1575, 2)),
        note: Some("dinner".into()),
        ..Default::default()
    };
    let updated = store.update("EXP-20240115-0001", &patch).unwrap().unwrap();
    assert_eq!(updated.amount, Decimal::new(1575, 2));
    assert_eq!(updated.note, "dinner");
    assert_eq!(updated.category, "food");
    assert_eq!(updated.created_at, "2024-01-15 12:00:00");
    assert_eq!(store.load_all().unwrap(), vec![updated]);
}

#[test]
fn update_touches_first_match_only() {
    let (store, _dir) = setup();
    let dup = "EXP-20240115-0001";
    store
        .save_all(&[expense(dup, Decimal::new(1, 0)), expense(dup, Decimal::new(2, 0))])
        .unwrap();
    let patch = ExpensePatch {
        category: Some("travel".into()),
        ..Default::default()
    };
    store.update(dup, &patch).unwrap();
    let all = store.load_all().unwrap();
    assert_eq!(all[0].category, "travel");
    assert_eq!(all[1].category, "food");
}

#[test]
fn update_unknown_id_returns_none() {
    let (store, _dir) = setup();
    let patch = ExpensePatch {
        note: Some("x".into()),
        ..Default::default()
    };
    assert!(store.update("EXP-20240115-0009", &patch).unwrap().is_none());
}

#[test]
fn document_without_version_loads() {
    let (store, _dir) = setup();
    std::fs::write(
        store.path(),
        r#"{"expenses": [
            {"id": "EXP-20240115-0001", "date": "2024-01-15", "category": "food", "amount": 12.5}
        ]}"#,
    )
    .unwrap();
    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, "EXP-20240115-0001");

    std::fs::write(store.path(), "{}").unwrap();
    assert!(store.load_all().unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn save_keeps_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let (store, _dir) = setup();
    std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();
    store
        .add(expense("EXP-20240115-0001", Decimal::new(10, 0)))
        .unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o644);
}
