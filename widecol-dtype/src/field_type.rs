use std::fmt::{Display, Formatter};

/// The declared storage type of a field.
///
/// The type decides which engine stores the field: [`FieldType::Bitmapped`] fields are
/// dictionary encoded into membership bitmaps, [`FieldType::BitSlicedInt`] fields are stored as
/// one bitmap per bit position, and everything else falls back to the key-value store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// The unset type. Rowsets refuse to be built over a field of this type.
    #[default]
    Unknown,
    /// A low-cardinality categorical field.
    Bitmapped,
    /// A non-negative integer field.
    BitSlicedInt,
    /// A 64-bit IEEE-754 float.
    Float,
    /// UTF-8 text.
    String,
    /// An opaque byte blob.
    Bytes,
    /// Microseconds since the Unix epoch.
    Timestamp,
}

impl FieldType {
    /// Whether values of this type are stored in the key-value fallback.
    pub fn is_key_value(&self) -> bool {
        matches!(
            self,
            FieldType::Float | FieldType::String | FieldType::Bytes | FieldType::Timestamp
        )
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Unknown => write!(f, "unknown"),
            FieldType::Bitmapped => write!(f, "bitmapped"),
            FieldType::BitSlicedInt => write!(f, "int"),
            FieldType::Float => write!(f, "float"),
            FieldType::String => write!(f, "string"),
            FieldType::Bytes => write!(f, "bytes"),
            FieldType::Timestamp => write!(f, "timestamp"),
        }
    }
}
