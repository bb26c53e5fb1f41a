use roaring::RoaringBitmap;
use widecol_dtype::{FieldType, RowId};
use widecol_error::WidecolResult;
use widecol_field::FieldEngine;
use widecol_field::aliases::hash_map::HashMap;
use widecol_scalar::Value;

use crate::DictKey;

/// Stores a categorical field as a deduplicated dictionary plus one membership bitmap per
/// distinct value.
///
/// `value_bits[i]` contains a row id iff that row's value equals `values[i]`. The three
/// collections always have the same length, and nulls never enter the dictionary.
///
/// Reads scan the membership bitmaps in dictionary order, so a lookup costs one bitmap probe
/// per distinct value rather than anything proportional to the number of rows. That is the
/// intended trade-off for low-cardinality fields; there is no reverse index from row to value.
#[derive(Debug, Clone, Default)]
pub struct DictionaryBitmapField {
    values: Vec<DictKey>,
    value_indexes: HashMap<DictKey, usize>,
    value_bits: Vec<RoaringBitmap>,
}

impl DictionaryBitmapField {
    /// Create an empty field, presized for `cardinality_hint` distinct values.
    pub fn new(cardinality_hint: usize) -> Self {
        Self {
            values: Vec::with_capacity(cardinality_hint),
            value_indexes: HashMap::with_capacity(cardinality_hint),
            value_bits: Vec::with_capacity(cardinality_hint),
        }
    }

    /// The distinct values in first-seen order.
    #[inline]
    pub fn values(&self) -> &[DictKey] {
        &self.values
    }

    /// The membership bitmap of the value at dictionary position `index`.
    pub fn value_bitmap(&self, index: usize) -> Option<&RoaringBitmap> {
        self.value_bits.get(index)
    }

    /// The dictionary position of `value`, if it has been seen.
    pub fn index_of(&self, value: &Value) -> Option<usize> {
        let key = DictKey::try_from(value).ok()?;
        self.value_indexes.get(&key).copied()
    }

    /// The number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no value has been inserted yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn code_for(&mut self, key: DictKey) -> usize {
        if let Some(code) = self.value_indexes.get(&key) {
            return *code;
        }

        let code = self.values.len();
        log::debug!("Appending dictionary value {} at code {}", key, code);
        self.values.push(key.clone());
        self.value_bits.push(RoaringBitmap::new());
        self.value_indexes.insert(key, code);
        code
    }
}

impl FieldEngine for DictionaryBitmapField {
    fn field_type(&self) -> FieldType {
        FieldType::Bitmapped
    }

    fn insert(&mut self, row_id: RowId, value: &Value) -> WidecolResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let key = DictKey::try_from(value)?;
        let code = self.code_for(key);
        self.value_bits[code].insert(row_id);
        Ok(())
    }

    fn get(&self, row_id: RowId) -> WidecolResult<Value> {
        // A row inserted with several values belongs to several bitmaps; the lowest code wins.
        Ok(self
            .values
            .iter()
            .zip(&self.value_bits)
            .find(|(_, bits)| bits.contains(row_id))
            .map(|(key, _)| Value::from(key))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn absent_rows_are_null() {
        let field = DictionaryBitmapField::new(4);
        assert_eq!(field.get(0).unwrap(), Value::Null);
        assert_eq!(field.get(1_298_423).unwrap(), Value::Null);
    }

    #[test]
    fn doesnt_store_nulls() {
        let mut field = DictionaryBitmapField::new(0);
        field.insert(1, &Value::Null).unwrap();

        assert_eq!(field.get(1).unwrap(), Value::Null);
        assert_eq!(field.values().len(), 0);
        assert_eq!(field.value_indexes.len(), 0);
        assert_eq!(field.value_bits.len(), 0);
    }

    #[rstest]
    #[case(Value::from("west"))]
    #[case(Value::Int(0))]
    #[case(Value::Int(-17))]
    #[case(Value::Int(i64::MAX))]
    fn round_trip(#[case] value: Value) {
        let mut field = DictionaryBitmapField::new(1);
        field.insert(42, &value).unwrap();
        assert_eq!(field.get(42).unwrap(), value);
        assert_eq!(field.get(43).unwrap(), Value::Null);
    }

    #[test]
    fn dedups_values() {
        let mut field = DictionaryBitmapField::new(2);
        field.insert(0, &Value::from("west")).unwrap();
        field.insert(1, &Value::from("west")).unwrap();
        field.insert(2, &Value::from("east")).unwrap();

        assert_eq!(field.len(), 2);
        assert_eq!(field.values.len(), field.value_indexes.len());
        assert_eq!(field.values.len(), field.value_bits.len());

        let west = field.index_of(&Value::from("west")).unwrap();
        assert_eq!(west, 0);
        let bits = field.value_bitmap(west).unwrap();
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(field.get(2).unwrap(), Value::from("east"));
    }

    #[test]
    fn first_seen_order() {
        let mut field = DictionaryBitmapField::new(0);
        for (row, value) in (0..).zip(["c", "a", "b", "a"]) {
            field.insert(row, &Value::from(value)).unwrap();
        }
        assert_eq!(
            field.values().iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["\"c\"", "\"a\"", "\"b\""]
        );
    }

    #[test]
    fn grows_past_cardinality_hint() {
        let mut field = DictionaryBitmapField::new(2);
        for row in 0..100u32 {
            field.insert(row, &Value::from(row)).unwrap();
        }
        assert_eq!(field.len(), 100);
        assert_eq!(field.get(57).unwrap(), Value::Int(57));
    }

    #[test]
    fn repeated_insert_is_idempotent() {
        let mut field = DictionaryBitmapField::new(1);
        field.insert(5, &Value::Int(3)).unwrap();
        field.insert(5, &Value::Int(3)).unwrap();
        assert_eq!(field.len(), 1);
        assert_eq!(field.value_bitmap(0).unwrap().len(), 1);
    }

    #[test]
    fn conflicting_values_resolve_to_lowest_code() {
        let mut field = DictionaryBitmapField::new(2);
        field.insert(9, &Value::from("first")).unwrap();
        field.insert(9, &Value::from("second")).unwrap();
        assert_eq!(field.get(9).unwrap(), Value::from("first"));
    }

    #[rstest]
    #[case(Value::Float(0.5))]
    #[case(Value::Float(f64::NAN))]
    #[case(Value::from(vec![0u8, 1]))]
    #[case(Value::Timestamp(10))]
    fn rejects_unsafe_keys_without_side_effects(#[case] value: Value) {
        let mut field = DictionaryBitmapField::new(0);
        let err = field.insert(3, &value).unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(field.is_empty());
        assert_eq!(field.get(3).unwrap(), Value::Null);
    }
}
