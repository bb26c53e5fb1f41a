#![deny(missing_docs)]

//! The storage contract shared by every Widecol field engine.
//!
//! A field engine owns the storage of exactly one schema field. The rowset fans each row out to
//! its engines with [`FieldEngine::insert`] and gathers it back with [`FieldEngine::get`].

use std::fmt::Debug;

use widecol_dtype::{FieldType, RowId};
use widecol_error::WidecolResult;
use widecol_scalar::Value;

pub mod aliases;

/// Row-at-a-time storage for a single field.
pub trait FieldEngine: Debug {
    /// The declared type of the field this engine stores.
    fn field_type(&self) -> FieldType;

    /// Record `value` for `row_id`.
    ///
    /// Inserting [`Value::Null`] is a no-op that succeeds. Re-inserting a row id is additive, not
    /// an overwrite: engines do not detect it, and callers must not rely on it.
    fn insert(&mut self, row_id: RowId, value: &Value) -> WidecolResult<()>;

    /// Read back the value recorded for `row_id`, or [`Value::Null`] if there is none.
    ///
    /// A row id that was never inserted is not an error.
    fn get(&self, row_id: RowId) -> WidecolResult<Value>;
}
