#![deny(missing_docs)]

//! Columnar storage for wide, sparse tabular datasets.
//!
//! A [`Rowset`] is built once from a [`Schema`](dtype::Schema) and accepts row-major inserts and
//! random-access reads by row id. Internally each field is stored by the engine that suits its
//! declared type:
//!
//! * `Bitmapped` fields are dictionary encoded into one membership bitmap per distinct value.
//! * `BitSlicedInt` fields are stored as one bitmap per bit position.
//! * Everything else is encoded to bytes and kept in an ordered key-value store.
//!
//! ```
//! use widecol::Rowset;
//! use widecol::dtype::{FieldDescriptor, FieldType};
//! use widecol::scalar::Value;
//!
//! let mut rowset = Rowset::try_from_fields(vec![
//!     FieldDescriptor::new("id", FieldType::String),
//!     FieldDescriptor::new("age", FieldType::BitSlicedInt),
//!     FieldDescriptor::new("region", FieldType::Bitmapped).with_cardinality_hint(4),
//! ])?;
//!
//! rowset.insert_row(0, &[Value::from("u1"), Value::Int(34), Value::from("west")])?;
//! assert_eq!(
//!     rowset.get_row(0)?,
//!     vec![Value::from("u1"), Value::Int(34), Value::from("west")]
//! );
//! assert_eq!(rowset.get_row(1)?, vec![Value::Null; 3]);
//! # Ok::<(), widecol::error::WidecolError>(())
//! ```

pub use rowset::*;
pub use storage::*;
pub use {
    widecol_dtype as dtype, widecol_error as error, widecol_field as field, widecol_kv as kv,
    widecol_scalar as scalar,
};

mod rowset;
mod storage;
#[cfg(any(test, feature = "test-harness"))]
pub mod test_harness;

pub mod encodings {
    //! The field engines a rowset dispatches to.

    pub use {widecol_bitsliced as bitsliced, widecol_dict as dict};
}
