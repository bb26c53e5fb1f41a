use std::fmt::{Display, Formatter};
use std::sync::Arc;

use widecol_error::{WidecolError, WidecolResult, widecol_bail};
use widecol_scalar::Value;

/// A value that can be used as a dictionary key.
///
/// Only variants with well-defined equality and hashing are accepted. Floats (NaN), byte blobs
/// and timestamps are rejected with a type mismatch rather than hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DictKey {
    /// An integer key.
    Int(i64),
    /// A text key.
    Text(Arc<str>),
}

impl TryFrom<&Value> for DictKey {
    type Error = WidecolError;

    fn try_from(value: &Value) -> WidecolResult<Self> {
        match value {
            Value::Int(v) => Ok(DictKey::Int(*v)),
            Value::Text(v) => Ok(DictKey::Text(v.clone())),
            other => widecol_bail!(TypeMismatch: "int or text", other.kind()),
        }
    }
}

impl From<DictKey> for Value {
    fn from(key: DictKey) -> Self {
        match key {
            DictKey::Int(v) => Value::Int(v),
            DictKey::Text(v) => Value::Text(v),
        }
    }
}

impl From<&DictKey> for Value {
    fn from(key: &DictKey) -> Self {
        Value::from(key.clone())
    }
}

impl Display for DictKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DictKey::Int(v) => write!(f, "{v}"),
            DictKey::Text(v) => write!(f, "\"{v}\""),
        }
    }
}
