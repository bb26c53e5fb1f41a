//! Bit-sliced storage of non-negative integer fields.
//!
//! An integer column is stored as one bitmap per bit position (a plane) plus a bitmap of the
//! rows that hold a value at all. Reading a row sums the weights of the planes that contain it.

pub use field::*;

mod field;

/// The number of planes needed to represent `value`: the minimal `k` such that `2^k > value`.
///
/// ```
/// use widecol_bitsliced::required_planes;
///
/// assert_eq!(required_planes(0), 0);
/// assert_eq!(required_planes(1), 1);
/// assert_eq!(required_planes(1023), 10);
/// assert_eq!(required_planes(1024), 11);
/// ```
#[inline]
pub const fn required_planes(value: u64) -> usize {
    (u64::BITS - value.leading_zeros()) as usize
}
