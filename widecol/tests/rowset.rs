#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use rstest::rstest;
use widecol::Rowset;
use widecol::dtype::{FieldDescriptor, FieldType, Schema};
use widecol::error::{WidecolResult, widecol_bail};
use widecol::kv::{KvStore, MemKvStore, SledKvStore, split_row_key};
use widecol::scalar::{Row, Value};

fn schema() -> Schema {
    Schema::try_new(vec![
        FieldDescriptor::new("id", FieldType::String),
        FieldDescriptor::new("score", FieldType::Float),
        FieldDescriptor::new("age", FieldType::BitSlicedInt),
        FieldDescriptor::new("region", FieldType::Bitmapped).with_cardinality_hint(4),
        FieldDescriptor::new("avatar", FieldType::Bytes),
        FieldDescriptor::new("seen", FieldType::Timestamp),
    ])
    .unwrap()
}

fn row(id: &str, score: Option<f64>, age: Option<i64>, region: Option<&str>) -> Row {
    vec![
        id.into(),
        score.into(),
        age.into(),
        region.into(),
        Value::from(id.as_bytes()),
        Value::Timestamp(1_700_000_000_000_000),
    ]
}

/// Counts writes and reads on top of an in-memory store.
#[derive(Debug, Default)]
struct CountingStore {
    inner: MemKvStore,
    puts: AtomicUsize,
    gets: AtomicUsize,
}

impl KvStore for CountingStore {
    fn put(&self, key: &[u8], value: &[u8]) -> WidecolResult<()> {
        self.puts.fetch_add(1, Ordering::Relaxed);
        self.inner.put(key, value)
    }

    fn get(&self, key: &[u8]) -> WidecolResult<Option<Bytes>> {
        self.gets.fetch_add(1, Ordering::Relaxed);
        self.inner.get(key)
    }
}

/// Accepts reads but refuses every write.
#[derive(Debug)]
struct ReadOnlyStore;

impl KvStore for ReadOnlyStore {
    fn put(&self, _key: &[u8], _value: &[u8]) -> WidecolResult<()> {
        widecol_bail!(StorageBackend: "store is read-only")
    }

    fn get(&self, _key: &[u8]) -> WidecolResult<Option<Bytes>> {
        Ok(None)
    }
}

#[rstest]
#[case(row("u1", Some(0.91), Some(34), Some("west")))]
#[case(row("u2", None, Some(99), Some("west")))]
#[case(row("u3", Some(-0.0), None, None))]
#[case(row("", Some(f64::MAX), Some(0), Some("")))]
fn round_trips_rows(#[case] row: Row) {
    let mut rowset = Rowset::try_new(schema()).unwrap();
    rowset.insert_row(12, &row).unwrap();
    assert_eq!(rowset.get_row(12).unwrap(), row);
    assert_eq!(rowset.get_row(13).unwrap(), vec![Value::Null; 6]);
}

#[test]
fn only_key_value_fields_touch_the_store() {
    let mut rowset = Rowset::try_new_with_store(schema(), CountingStore::default()).unwrap();
    rowset
        .insert_row(0, &row("u1", Some(0.5), Some(3), Some("east")))
        .unwrap();
    assert_eq!(rowset.store().puts.load(Ordering::Relaxed), 4);

    rowset
        .insert_row(1, &row("u2", None, None, None))
        .unwrap();
    assert_eq!(rowset.store().puts.load(Ordering::Relaxed), 7);

    rowset.get_row(0).unwrap();
    assert_eq!(rowset.store().gets.load(Ordering::Relaxed), 4);
}

#[test]
fn store_keys_are_row_major() {
    let mut rowset = Rowset::try_new(schema()).unwrap();
    for id in [300, 2, 70_000] {
        rowset
            .insert_row(id, &row("u", Some(1.0), None, None))
            .unwrap();
    }

    let keys = rowset
        .store()
        .keys()
        .unwrap()
        .iter()
        .map(|key| {
            let (row_id, field) = split_row_key(key).unwrap();
            (row_id, field.to_string())
        })
        .collect::<Vec<_>>();

    let rows = keys.iter().map(|(row_id, _)| *row_id).collect::<Vec<_>>();
    assert!(rows.is_sorted());
    assert_eq!(keys.len(), 12);
    assert_eq!(keys[0], (2, "avatar".to_string()));
}

#[test]
fn backend_failures_propagate() {
    let mut rowset = Rowset::try_new_with_store(schema(), ReadOnlyStore).unwrap();
    let err = rowset
        .insert_row(0, &row("u1", None, Some(1), Some("west")))
        .unwrap_err();
    assert!(err.is_storage_backend());
    assert!(err.to_string().contains("store is read-only"));

    // Reads against a store that never accepted a write see only nulls.
    assert_eq!(rowset.get_row(0).unwrap(), vec![Value::Null; 6]);
}

#[rstest]
#[case(1, Value::Int(1))]
#[case(1, Value::from("0.5"))]
#[case(3, Value::Float(2.0))]
#[case(3, Value::Bytes(Bytes::from_static(b"west")))]
#[case(4, Value::from("not bytes"))]
#[case(5, Value::Int(17))]
fn type_mismatches_propagate(#[case] index: usize, #[case] value: Value) {
    let mut rowset = Rowset::try_new(schema()).unwrap();
    let mut row = vec![Value::Null; 6];
    row[index] = value;
    assert!(rowset.insert_row(0, &row).unwrap_err().is_type_mismatch());
    assert_eq!(rowset.get_row(0).unwrap(), vec![Value::Null; 6]);
}

#[test]
fn additive_reinsert_is_caller_responsibility() {
    let mut rowset = Rowset::try_from_fields(vec![
        FieldDescriptor::new("flags", FieldType::BitSlicedInt),
        FieldDescriptor::new("label", FieldType::String),
    ])
    .unwrap();

    rowset.insert_row(0, &[Value::Int(1), Value::from("a")]).unwrap();
    rowset.insert_row(0, &[Value::Int(2), Value::from("b")]).unwrap();

    // Bit planes accumulate while the key-value store overwrites.
    assert_eq!(
        rowset.get_row(0).unwrap(),
        vec![Value::Int(3), Value::from("b")]
    );
}

#[test]
fn sled_database_at_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut rowset =
        Rowset::try_new_with_store(schema(), SledKvStore::open(dir.path()).unwrap()).unwrap();

    let first = row("u1", Some(0.91), Some(34), Some("west"));
    rowset.insert_row(0, &first).unwrap();
    assert_eq!(rowset.get_row(0).unwrap(), first);
}
