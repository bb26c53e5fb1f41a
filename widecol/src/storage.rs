use widecol_bitsliced::BitSlicedIntField;
use widecol_dict::DictionaryBitmapField;
use widecol_dtype::{FieldDescriptor, FieldType, RowId};
use widecol_error::{WidecolResult, widecol_bail, widecol_err};
use widecol_field::FieldEngine;
use widecol_kv::{KeyValueFallbackField, KvStore};
use widecol_scalar::Value;

/// The engine backing a single field of a rowset.
#[derive(Debug, Clone)]
pub enum FieldStorage {
    /// A `Bitmapped` field.
    Dictionary(DictionaryBitmapField),
    /// A `BitSlicedInt` field.
    BitSliced(BitSlicedIntField),
    /// A float, string, bytes or timestamp field held in the key-value store.
    KeyValue(KeyValueFallbackField),
}

impl FieldStorage {
    /// Choose and construct the engine for `descriptor`.
    pub fn try_new(descriptor: &FieldDescriptor) -> WidecolResult<Self> {
        Ok(match descriptor.field_type() {
            FieldType::Unknown => {
                widecol_bail!(Schema: "field \"{}\" has an unknown type", descriptor.name())
            }
            FieldType::Bitmapped => {
                Self::Dictionary(DictionaryBitmapField::new(descriptor.cardinality_hint()))
            }
            FieldType::BitSlicedInt => Self::BitSliced(BitSlicedIntField::new()),
            FieldType::Float | FieldType::String | FieldType::Bytes | FieldType::Timestamp => {
                Self::KeyValue(KeyValueFallbackField::try_new(descriptor).map_err(|_| {
                    widecol_err!(
                        Schema: "field \"{}\" of type {} cannot be held in the key-value store",
                        descriptor.name(),
                        descriptor.field_type()
                    )
                })?)
            }
        })
    }

    /// The type of the field this engine stores.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldStorage::Dictionary(field) => field.field_type(),
            FieldStorage::BitSliced(field) => field.field_type(),
            FieldStorage::KeyValue(field) => field.codec().field_type(),
        }
    }

    /// The dictionary engine, if this is a `Bitmapped` field.
    pub fn as_dictionary(&self) -> Option<&DictionaryBitmapField> {
        match self {
            FieldStorage::Dictionary(field) => Some(field),
            _ => None,
        }
    }

    /// The bit-sliced engine, if this is a `BitSlicedInt` field.
    pub fn as_bit_sliced(&self) -> Option<&BitSlicedIntField> {
        match self {
            FieldStorage::BitSliced(field) => Some(field),
            _ => None,
        }
    }

    /// The key-value fallback, if this field is held in the store.
    pub fn as_key_value(&self) -> Option<&KeyValueFallbackField> {
        match self {
            FieldStorage::KeyValue(field) => Some(field),
            _ => None,
        }
    }

    /// Insert `value` into this field, using `store` if the field is held there.
    pub fn insert<S: KvStore + ?Sized>(
        &mut self,
        store: &S,
        row_id: RowId,
        value: &Value,
    ) -> WidecolResult<()> {
        match self {
            FieldStorage::Dictionary(field) => field.insert(row_id, value),
            FieldStorage::BitSliced(field) => field.insert(row_id, value),
            FieldStorage::KeyValue(field) => field.bind(store).insert(row_id, value),
        }
    }

    /// Read the value of `row_id`, using `store` if the field is held there.
    pub fn get<S: KvStore + ?Sized>(&self, store: &S, row_id: RowId) -> WidecolResult<Value> {
        match self {
            FieldStorage::Dictionary(field) => field.get(row_id),
            FieldStorage::BitSliced(field) => field.get(row_id),
            FieldStorage::KeyValue(field) => field.bind(store).get(row_id),
        }
    }
}
