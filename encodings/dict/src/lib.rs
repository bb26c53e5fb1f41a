//! Dictionary encoding of low-cardinality categorical fields.
//!
//! Every distinct value is appended to a dictionary in first-seen order and owns one membership
//! bitmap of the rows that hold it.

pub use field::*;
pub use key::*;

mod field;
mod key;
