use roaring::RoaringBitmap;
use widecol_dtype::{FieldType, RowId};
use widecol_error::{WidecolResult, widecol_bail, widecol_err};
use widecol_field::FieldEngine;
use widecol_scalar::Value;

use crate::required_planes;

/// Stores a non-negative integer field as one bitmap per bit position.
///
/// `planes[i]` contains a row id iff bit `i` of that row's value is set, and `set_bits` contains
/// every row that holds a value. Planes are appended on demand and never reclaimed, so once a
/// field has grown to `k` planes it stays there. After the first insert `max == 2^k`, which
/// strictly exceeds every value inserted so far.
#[derive(Debug, Clone, Default)]
pub struct BitSlicedIntField {
    max: u64,
    set_bits: RoaringBitmap,
    planes: Vec<RoaringBitmap>,
}

impl BitSlicedIntField {
    /// Create an empty field with no planes.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current representable capacity. Zero until the first value is inserted.
    #[inline]
    pub fn max(&self) -> u64 {
        self.max
    }

    /// The number of bit planes.
    #[inline]
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// The bit planes, least significant first.
    #[inline]
    pub fn planes(&self) -> &[RoaringBitmap] {
        &self.planes
    }

    /// The rows that hold a value.
    #[inline]
    pub fn set_bits(&self) -> &RoaringBitmap {
        &self.set_bits
    }

    fn grow(&mut self, value: u64) {
        let required = required_planes(value);
        if required > self.planes.len() {
            log::trace!(
                "Growing bit-sliced planes from {} to {}",
                self.planes.len(),
                required
            );
            self.planes.resize_with(required, RoaringBitmap::new);
        }
        self.max = 1 << self.planes.len();
    }
}

impl FieldEngine for BitSlicedIntField {
    fn field_type(&self) -> FieldType {
        FieldType::BitSlicedInt
    }

    fn insert(&mut self, row_id: RowId, value: &Value) -> WidecolResult<()> {
        let value = match value {
            Value::Null => return Ok(()),
            Value::Int(v) => u64::try_from(*v)
                .map_err(|_| widecol_err!(TypeMismatch: "non-negative int", format!("{v}")))?,
            other => widecol_bail!(TypeMismatch: "int", other.kind()),
        };

        if value >= self.max {
            self.grow(value);
        }

        self.set_bits.insert(row_id);
        for (bit, plane) in self.planes.iter_mut().enumerate() {
            if value & (1 << bit) != 0 {
                plane.insert(row_id);
            }
        }

        Ok(())
    }

    fn get(&self, row_id: RowId) -> WidecolResult<Value> {
        if !self.set_bits.contains(row_id) {
            return Ok(Value::Null);
        }

        let value = self
            .planes
            .iter()
            .enumerate()
            .filter(|(_, plane)| plane.contains(row_id))
            .fold(0u64, |acc, (bit, _)| acc | (1 << bit));

        i64::try_from(value)
            .map(Value::Int)
            .map_err(|_| widecol_err!("bit-sliced value {} of row {} overflows i64", value, row_id))
    }
}
