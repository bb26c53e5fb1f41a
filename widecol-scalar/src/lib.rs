//! Dynamically-typed cell values exchanged with a rowset.
//!
//! A [`Value`] is a closed set of variants, so every field engine matches it exhaustively
//! instead of asserting types at runtime.

mod convert;
mod display;
mod value;

pub use value::*;

/// One value per schema field, in schema order. Rows are never retained by the storage engines.
pub type Row = Vec<Value>;
