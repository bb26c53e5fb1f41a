use widecol_dtype::{FieldDescriptor, FieldName, RowId, Schema};
use widecol_error::{WidecolResult, widecol_bail};
use widecol_kv::{KvStore, SledKvStore};
use widecol_scalar::{Row, Value};

use crate::FieldStorage;

/// A set of rows stored column by column.
///
/// Every field of the schema is backed by one engine, chosen once at construction from the
/// field's declared type. Rows go in and come out as vectors aligned with the schema.
///
/// The rowset owns its key-value store. Fallback fields borrow it for the duration of each call,
/// so a single store serves all of them and disappears with the rowset.
#[derive(Debug)]
pub struct Rowset<S = SledKvStore> {
    schema: Schema,
    storage: Vec<FieldStorage>,
    store: S,
}

impl Rowset<SledKvStore> {
    /// Build a rowset over `schema`, backed by a temporary sled database that is removed with
    /// the rowset.
    pub fn try_new(schema: Schema) -> WidecolResult<Self> {
        Self::try_new_with_store(schema, SledKvStore::temporary()?)
    }

    /// Build a rowset from an ordered list of field declarations.
    ///
    /// Fails with a schema error if two fields share a name or any field has an unknown type.
    pub fn try_from_fields(fields: Vec<FieldDescriptor>) -> WidecolResult<Self> {
        Self::try_new(Schema::try_new(fields)?)
    }
}

impl<S: KvStore> Rowset<S> {
    /// Build a rowset over `schema` whose fallback fields write to `store`.
    pub fn try_new_with_store(schema: Schema, store: S) -> WidecolResult<Self> {
        let storage = schema
            .iter()
            .map(FieldStorage::try_new)
            .collect::<WidecolResult<Vec<_>>>()?;

        let (mut dictionary, mut bit_sliced, mut key_value) = (0, 0, 0);
        for field in &storage {
            match field {
                FieldStorage::Dictionary(_) => dictionary += 1,
                FieldStorage::BitSliced(_) => bit_sliced += 1,
                FieldStorage::KeyValue(_) => key_value += 1,
            }
        }
        log::debug!(
            "Created rowset with {} fields: {} dictionary, {} bit-sliced, {} key-value",
            storage.len(),
            dictionary,
            bit_sliced,
            key_value
        );

        Ok(Self {
            schema,
            storage,
            store,
        })
    }

    /// Write one row.
    ///
    /// `row` must hold exactly one value per schema field, in schema order; otherwise nothing is
    /// written. Null values are skipped. Fields are written in order and the first failure is
    /// returned as is, leaving the fields before it written.
    pub fn insert_row(&mut self, row_id: RowId, row: &[Value]) -> WidecolResult<()> {
        if row.len() != self.schema.len() {
            widecol_bail!(
                "row {} has {} values but the schema has {} fields",
                row_id,
                row.len(),
                self.schema.len()
            );
        }

        for ((field, storage), value) in self.schema.iter().zip(&mut self.storage).zip(row) {
            if value.is_null() {
                continue;
            }

            if let Err(err) = storage.insert(&self.store, row_id, value) {
                log::trace!("Insert of row {} failed at field {}", row_id, field.name());
                return Err(err);
            }
        }

        Ok(())
    }

    /// Read one row back, with nulls for every field that holds no value for `row_id`.
    pub fn get_row(&self, row_id: RowId) -> WidecolResult<Row> {
        self.storage
            .iter()
            .map(|storage| storage.get(&self.store, row_id))
            .collect()
    }

    /// The schema the rowset was built over.
    #[inline]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// The store backing the key-value fields.
    #[inline]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The engine backing the field called `name`.
    pub fn storage(&self, name: &str) -> Option<&FieldStorage> {
        self.schema
            .find(name)
            .and_then(|index| self.storage.get(index))
    }

    /// The engine backing the field at schema position `index`.
    pub fn storage_at(&self, index: usize) -> Option<&FieldStorage> {
        self.storage.get(index)
    }

    /// The names of the fields held in the key-value store, in schema order.
    pub fn key_value_fields(&self) -> impl Iterator<Item = &FieldName> + '_ {
        self.storage
            .iter()
            .filter_map(FieldStorage::as_key_value)
            .map(|field| field.name())
    }
}
