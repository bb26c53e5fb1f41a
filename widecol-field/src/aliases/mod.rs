//! Hash collections used by field engines.
//!
//! Engines key their dictionaries through these aliases rather than `std::collections`, so the
//! hasher can be swapped in one place.

pub mod hash_map;
