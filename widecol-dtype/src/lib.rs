#![deny(missing_docs)]

//! A type system for Widecol
//!
//! This crate contains the field types a rowset understands, the descriptors that name and
//! type each field, and the [`Schema`] that fixes their positional order.

pub use field::*;
pub use field_type::*;
pub use schema::*;

mod field;
mod field_type;
mod schema;

/// Caller-assigned identifier of a row, shared by every field engine of a rowset.
///
/// Row ids need not be dense or contiguous.
pub type RowId = u32;
