//! Storage for unbounded-cardinality scalar fields.
//!
//! Floats, strings, byte blobs and timestamps are encoded to bytes and delegated to an external
//! ordered key-value store, keyed by row id and field name. The store itself is owned by the
//! rowset; fields only borrow it for the duration of a call.
//!
//! Rowsets default to a temporary [`SledKvStore`]. [`MemKvStore`] is a lightweight map for
//! callers that inject their own store.

pub use codec::*;
pub use field::*;
pub use key::*;
pub use sled_store::*;
pub use store::*;

mod codec;
mod field;
mod key;
mod sled_store;
mod store;
