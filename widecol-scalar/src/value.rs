use std::sync::Arc;

use bytes::Bytes;

/// A single cell of a row.
///
/// `Null` stands for an absent value. Absent values are never materialized by the field engines,
/// so reading a field that was never written for a row also yields `Null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// An absent value.
    #[default]
    Null,
    /// A signed 64-bit integer.
    Int(i64),
    /// A 64-bit IEEE-754 float.
    Float(f64),
    /// UTF-8 text.
    Text(Arc<str>),
    /// An opaque byte blob.
    Bytes(Bytes),
    /// Microseconds since the Unix epoch.
    Timestamp(i64),
}

impl Value {
    /// Whether this is the null marker.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// A short lowercase name for the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Timestamp(_) => "timestamp",
        }
    }

    /// The integer payload, if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The text payload, if this is `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The byte payload, if this is `Bytes`.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(v) => Some(v),
            _ => None,
        }
    }

    /// The timestamp payload in microseconds, if this is a `Timestamp`.
    pub fn as_timestamp(&self) -> Option<i64> {
        match self {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}
