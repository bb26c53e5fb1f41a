//! Seeded synthetic rows for tests and benchmarks.
//!
//! A [`RowGenerator`] owns one [`GenField`] per column and a fixed-seed [`StdRng`], so the same
//! seed always yields the same rows.

use std::fmt::{Debug, Formatter};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use widecol_dtype::{FieldDescriptor, FieldName, FieldType, Schema};
use widecol_error::WidecolResult;
use widecol_scalar::{Row, Value};

/// Microseconds since the epoch for 2020-01-01 and 2030-01-01.
const TIMESTAMP_RANGE: std::ops::Range<i64> = 1_577_836_800_000_000..1_893_456_000_000_000;

type Generate = Box<dyn FnMut(&mut StdRng) -> Value + Send>;

/// A named, typed column together with the function that produces its values.
pub struct GenField {
    name: FieldName,
    field_type: FieldType,
    generate: Generate,
}

impl GenField {
    /// A column whose values come from `generate`.
    pub fn new(
        name: impl Into<FieldName>,
        field_type: FieldType,
        generate: impl FnMut(&mut StdRng) -> Value + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            generate: Box::new(generate),
        }
    }

    /// The column name.
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// The declared type of the column.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The descriptor for this column.
    pub fn descriptor(&self, cardinality_hint: usize) -> FieldDescriptor {
        FieldDescriptor::new(self.name.clone(), self.field_type)
            .with_cardinality_hint(cardinality_hint)
    }

    /// Draw the next value.
    pub fn generate(&mut self, rng: &mut StdRng) -> Value {
        (self.generate)(rng)
    }
}

impl Debug for GenField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenField")
            .field("name", &self.name)
            .field("field_type", &self.field_type)
            .finish_non_exhaustive()
    }
}

fn draw_null(rng: &mut StdRng, null_pct: f64) -> bool {
    null_pct > 0.0 && rng.random::<f64>() < null_pct
}

/// A string column of random UUIDs, never null.
pub fn id_field(name: impl Into<FieldName>) -> GenField {
    GenField::new(name, FieldType::String, |rng| {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        Value::from(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
    })
}

/// A float column drawn uniformly from `[min, max)`, null with probability `null_pct`.
pub fn float_field(name: impl Into<FieldName>, min: f64, max: f64, null_pct: f64) -> GenField {
    let diff = max - min;
    GenField::new(name, FieldType::Float, move |rng| {
        if draw_null(rng, null_pct) {
            return Value::Null;
        }
        Value::Float(rng.random::<f64>() * diff + min)
    })
}

/// A bitmapped column over the strings `"1"` to `"n_values"`, null with probability `null_pct`.
///
/// `n_values` must be positive.
pub fn bitmapped_field(name: impl Into<FieldName>, n_values: u32, null_pct: f64) -> GenField {
    GenField::new(name, FieldType::Bitmapped, move |rng| {
        if draw_null(rng, null_pct) {
            return Value::Null;
        }
        Value::from((rng.random_range(0..n_values) + 1).to_string())
    })
}

/// A bit-sliced int column drawn from `[0, max_value)`, null with probability `null_pct`.
///
/// `max_value` must be positive.
pub fn int_field(name: impl Into<FieldName>, max_value: i64, null_pct: f64) -> GenField {
    GenField::new(name, FieldType::BitSlicedInt, move |rng| {
        if draw_null(rng, null_pct) {
            return Value::Null;
        }
        Value::Int(rng.random_range(0..max_value))
    })
}

/// A bytes column of random blobs between `min_len` and `max_len` bytes long, never null.
pub fn bytes_field(name: impl Into<FieldName>, min_len: usize, max_len: usize) -> GenField {
    GenField::new(name, FieldType::Bytes, move |rng| {
        let mut blob = vec![0u8; rng.random_range(min_len..=max_len)];
        rng.fill(blob.as_mut_slice());
        Value::from(blob)
    })
}

/// A timestamp column in the 2020s, null with probability `null_pct`.
pub fn timestamp_field(name: impl Into<FieldName>, null_pct: f64) -> GenField {
    GenField::new(name, FieldType::Timestamp, move |rng| {
        if draw_null(rng, null_pct) {
            return Value::Null;
        }
        Value::Timestamp(rng.random_range(TIMESTAMP_RANGE))
    })
}

/// Wrap `field` so that a further `null_pct` of its values come out null.
pub fn sparse(null_pct: f64, mut field: GenField) -> GenField {
    let (name, field_type) = (field.name.clone(), field.field_type);
    GenField::new(name, field_type, move |rng| {
        if draw_null(rng, null_pct) {
            return Value::Null;
        }
        field.generate(rng)
    })
}

/// Produces rows for a fixed list of columns.
#[derive(Debug)]
pub struct RowGenerator {
    fields: Vec<GenField>,
    rng: StdRng,
}

impl RowGenerator {
    /// A generator over `fields`, seeded with `seed`.
    pub fn new(fields: Vec<GenField>, seed: u64) -> Self {
        Self {
            fields,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The columns in row order.
    pub fn fields(&self) -> &[GenField] {
        &self.fields
    }

    /// The schema matching the generated rows.
    pub fn schema(&self, cardinality_hint: usize) -> WidecolResult<Schema> {
        Schema::try_new(
            self.fields
                .iter()
                .map(|field| field.descriptor(cardinality_hint))
                .collect(),
        )
    }

    /// Draw one row.
    pub fn next_row(&mut self) -> Row {
        self.fields
            .iter_mut()
            .map(|field| field.generate(&mut self.rng))
            .collect()
    }

    /// Draw `n` rows.
    pub fn rows(&mut self, n: usize) -> Vec<Row> {
        (0..n).map(|_| self.next_row()).collect()
    }
}
