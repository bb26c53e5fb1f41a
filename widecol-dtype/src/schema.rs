use std::fmt::{Display, Formatter};
use std::sync::Arc;

use itertools::Itertools;
use widecol_error::{WidecolError, WidecolResult, widecol_bail};

use crate::{FieldDescriptor, FieldName};

/// An ordered, immutable list of field declarations.
///
/// Declaration order is the permanent positional mapping between a row and its fields: the
/// value at position `i` of every row belongs to `fields()[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<FieldDescriptor>", into = "Vec<FieldDescriptor>")
)]
pub struct Schema {
    fields: Arc<[FieldDescriptor]>,
}

impl Schema {
    /// Create a schema, rejecting duplicate field names.
    pub fn try_new(fields: Vec<FieldDescriptor>) -> WidecolResult<Self> {
        if let Some(name) = fields.iter().map(FieldDescriptor::name).duplicates().next() {
            widecol_bail!(Schema: "duplicate field name \"{}\"", name);
        }

        Ok(Self {
            fields: fields.into(),
        })
    }

    /// The number of fields, which is also the length of every row.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the schema declares no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The field declarations in positional order.
    #[inline]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The field declared at `index`, if any.
    pub fn field(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    /// The field names in positional order.
    pub fn names(&self) -> impl Iterator<Item = &FieldName> + '_ {
        self.fields.iter().map(FieldDescriptor::name)
    }

    /// Find the position of the field with the given name.
    pub fn find(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| &**f.name() == name)
    }

    /// Iterate over the field declarations in positional order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields.iter()
    }
}

impl TryFrom<Vec<FieldDescriptor>> for Schema {
    type Error = WidecolError;

    fn try_from(fields: Vec<FieldDescriptor>) -> WidecolResult<Self> {
        Self::try_new(fields)
    }
}

impl From<Schema> for Vec<FieldDescriptor> {
    fn from(schema: Schema) -> Self {
        schema.fields.to_vec()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Display for Schema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.fields.iter().join(", "))
    }
}
