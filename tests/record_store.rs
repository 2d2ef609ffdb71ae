//! Record Store Tests
//!
//! Exercises the SQLite-backed store directly: identifier assignment,
//! partial updates, deletion, batch inserts, and persistence across reopen.

use ecoact::schema::{EmissionFields, FieldPatch, FieldValue, FIELDS};
use ecoact::storage::{RecordStore, StoreError};
use tempfile::TempDir;

fn fields_with(pairs: &[(&str, FieldValue)]) -> EmissionFields {
    let mut fields = EmissionFields::default();
    for (name, value) in pairs {
        fields.set(name, Some(value.clone())).unwrap();
    }
    fields
}

#[test]
fn test_create_assigns_increasing_ids() {
    let store = RecordStore::open_in_memory().unwrap();

    let a = store.create(&EmissionFields::default()).unwrap();
    let b = store.create(&EmissionFields::default()).unwrap();
    assert_eq!(a, 1);
    assert!(b > a);
}

#[test]
fn test_get_returns_stored_values() {
    let store = RecordStore::open_in_memory().unwrap();
    let fields = fields_with(&[
        ("co2f", FieldValue::Float(12.5)),
        ("source", FieldValue::Text("ADEME".to_string())),
    ]);

    let id = store.create(&fields).unwrap();
    let record = store.get_by_id(id).unwrap();

    assert_eq!(record.id, id);
    assert_eq!(record.fields, fields);
    assert_eq!(record.fields.co2f, Some(12.5));
    assert_eq!(record.fields.n2o, None);
}

#[test]
fn test_update_touches_only_patched_fields() {
    let store = RecordStore::open_in_memory().unwrap();
    let id = store
        .create(&fields_with(&[
            ("co2f", FieldValue::Float(12.5)),
            ("source", FieldValue::Text("ADEME".to_string())),
        ]))
        .unwrap();

    let patch = FieldPatch::new()
        .with("co2f", Some(FieldValue::Float(99.75)))
        .unwrap();
    store.update(id, &patch).unwrap();

    let record = store.get_by_id(id).unwrap();
    assert_eq!(record.fields.co2f, Some(99.75));
    assert_eq!(record.fields.source.as_deref(), Some("ADEME"));
}

#[test]
fn test_update_can_clear_a_field() {
    let store = RecordStore::open_in_memory().unwrap();
    let id = store
        .create(&fields_with(&[("source", FieldValue::Text("ADEME".to_string()))]))
        .unwrap();

    let patch = FieldPatch::new().with("source", None).unwrap();
    store.update(id, &patch).unwrap();

    assert_eq!(store.get_by_id(id).unwrap().fields.source, None);
}

#[test]
fn test_missing_id_is_not_found_everywhere() {
    let store = RecordStore::open_in_memory().unwrap();
    let patch = FieldPatch::new()
        .with("co2f", Some(FieldValue::Float(1.0)))
        .unwrap();

    assert!(matches!(store.get_by_id(42), Err(StoreError::NotFound(42))));
    assert!(matches!(store.update(42, &patch), Err(StoreError::NotFound(42))));
    assert!(matches!(store.update(42, &FieldPatch::new()), Err(StoreError::NotFound(42))));
    assert!(matches!(store.delete(42), Err(StoreError::NotFound(42))));
}

#[test]
fn test_delete_removes_record_and_ids_are_not_reused() {
    let store = RecordStore::open_in_memory().unwrap();
    let first = store.create(&EmissionFields::default()).unwrap();
    let second = store.create(&EmissionFields::default()).unwrap();

    store.delete(second).unwrap();
    assert!(store.get_by_id(second).unwrap_err().is_not_found());
    assert_eq!(store.count().unwrap(), 1);

    let third = store.create(&EmissionFields::default()).unwrap();
    assert!(third > second);

    let ids: Vec<i64> = store.list_all().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![first, third]);
}

#[test]
fn test_insert_batch_returns_ids_in_order() {
    let store = RecordStore::open_in_memory().unwrap();
    let rows: Vec<EmissionFields> = (0..4)
        .map(|n| fields_with(&[("ch4f", FieldValue::Float(n as f64))]))
        .collect();

    let ids = store.insert_batch(&rows).unwrap();
    assert_eq!(ids.len(), 4);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let listed = store.list_all().unwrap();
    assert_eq!(listed.len(), 4);
    assert_eq!(listed[3].fields.ch4f, Some(3.0));
}

#[test]
fn test_every_field_round_trips() {
    let store = RecordStore::open_in_memory().unwrap();
    let mut fields = EmissionFields::default();
    for (i, def) in FIELDS.iter().enumerate() {
        let value = match def.kind {
            ecoact::schema::FieldKind::Text => FieldValue::Text(format!("{} {}", def.label, i)),
            ecoact::schema::FieldKind::Float => FieldValue::Float(i as f64 * 1.25),
        };
        fields.set(def.name, Some(value)).unwrap();
    }

    let id = store.create(&fields).unwrap();
    assert_eq!(store.get_by_id(id).unwrap().fields, fields);
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ecoact.db");

    let id = {
        let store = RecordStore::open(&path).unwrap();
        store
            .create(&fields_with(&[("co2b", FieldValue::Float(0.25))]))
            .unwrap()
    };

    let store = RecordStore::open(&path).unwrap();
    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(store.get_by_id(id).unwrap().fields.co2b, Some(0.25));
}
