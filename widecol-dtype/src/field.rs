use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::FieldType;

/// A name for a field in a schema
pub type FieldName = Arc<str>;

/// The declaration of a single field: its name, its storage type, and a sizing hint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDescriptor {
    name: FieldName,
    field_type: FieldType,
    cardinality_hint: usize,
}

impl FieldDescriptor {
    /// Create a descriptor with no cardinality hint.
    pub fn new(name: impl Into<FieldName>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            cardinality_hint: 0,
        }
    }

    /// Presize dictionary storage for roughly `cardinality_hint` distinct values.
    ///
    /// The hint is advisory; dictionaries grow past it.
    pub fn with_cardinality_hint(mut self, cardinality_hint: usize) -> Self {
        self.cardinality_hint = cardinality_hint;
        self
    }

    /// The field name, unique within a schema.
    #[inline]
    pub fn name(&self) -> &FieldName {
        &self.name
    }

    /// The declared storage type.
    #[inline]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The advisory number of distinct values.
    #[inline]
    pub fn cardinality_hint(&self) -> usize {
        self.cardinality_hint
    }
}

impl Display for FieldDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.name, self.field_type)
    }
}
