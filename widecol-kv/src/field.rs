use widecol_dtype::{FieldDescriptor, FieldName, FieldType, RowId};
use widecol_error::WidecolResult;
use widecol_field::FieldEngine;
use widecol_scalar::Value;

use crate::{KvCodec, KvStore, row_key};

/// A field whose values live in an external key-value store.
///
/// The field holds only its name and codec. The store is passed in on every call, so a single
/// store owned by the rowset serves every fallback field.
#[derive(Debug, Clone)]
pub struct KeyValueFallbackField {
    name: FieldName,
    codec: KvCodec,
}

impl KeyValueFallbackField {
    /// Create the fallback field for `descriptor`.
    ///
    /// Fails with an unsupported type error unless the declared type is float, string, bytes
    /// or timestamp.
    pub fn try_new(descriptor: &FieldDescriptor) -> WidecolResult<Self> {
        Ok(Self {
            name: descriptor.name().clone(),
            codec: KvCodec::try_from(descriptor.field_type())?,
        })
    }

    /// The name of the field, which is part of every key it writes.
    #[inline]
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// The codec chosen from the declared type.
    #[inline]
    pub fn codec(&self) -> KvCodec {
        self.codec
    }

    /// Encode `value` and store it under this field's key for `row_id`.
    pub fn insert<S: KvStore + ?Sized>(
        &self,
        store: &S,
        row_id: RowId,
        value: &Value,
    ) -> WidecolResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let encoded = self.codec.encode(value)?;
        store.put(&row_key(row_id, &self.name), &encoded)
    }

    /// Fetch and decode the value stored for `row_id`, or null if there is none.
    pub fn get<S: KvStore + ?Sized>(&self, store: &S, row_id: RowId) -> WidecolResult<Value> {
        match store.get(&row_key(row_id, &self.name))? {
            Some(bytes) => self.codec.decode(bytes),
            None => Ok(Value::Null),
        }
    }

    /// Pair this field with a store, producing a [`FieldEngine`].
    pub fn bind<'a, S: KvStore + ?Sized>(&'a self, store: &'a S) -> BoundKvField<'a, S> {
        BoundKvField { field: self, store }
    }
}

/// A [`KeyValueFallbackField`] borrowed together with the store it writes to.
#[derive(Debug)]
pub struct BoundKvField<'a, S: ?Sized> {
    field: &'a KeyValueFallbackField,
    store: &'a S,
}

impl<S: KvStore + ?Sized> FieldEngine for BoundKvField<'_, S> {
    fn field_type(&self) -> FieldType {
        self.field.codec.field_type()
    }

    fn insert(&mut self, row_id: RowId, value: &Value) -> WidecolResult<()> {
        self.field.insert(self.store, row_id, value)
    }

    fn get(&self, row_id: RowId) -> WidecolResult<Value> {
        self.field.get(self.store, row_id)
    }
}
