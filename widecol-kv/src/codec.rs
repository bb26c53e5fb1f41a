use bytes::Bytes;
use widecol_dtype::FieldType;
use widecol_error::{WidecolError, WidecolResult, widecol_bail, widecol_err};
use widecol_scalar::Value;

/// The fixed byte encoding of a key-value fallback type.
///
/// | Type | Encoding |
/// |---|---|
/// | Float | 8-byte little-endian IEEE-754 |
/// | String | UTF-8 bytes |
/// | Bytes | raw bytes |
/// | Timestamp | 8-byte little-endian `i64` microseconds |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KvCodec {
    /// 64-bit floats.
    Float,
    /// UTF-8 text.
    String,
    /// Opaque byte blobs.
    Bytes,
    /// Microsecond timestamps.
    Timestamp,
}

impl TryFrom<FieldType> for KvCodec {
    type Error = WidecolError;

    fn try_from(field_type: FieldType) -> WidecolResult<Self> {
        Ok(match field_type {
            FieldType::Float => KvCodec::Float,
            FieldType::String => KvCodec::String,
            FieldType::Bytes => KvCodec::Bytes,
            FieldType::Timestamp => KvCodec::Timestamp,
            FieldType::Unknown | FieldType::Bitmapped | FieldType::BitSlicedInt => {
                widecol_bail!(UnsupportedType: "{field_type} fields cannot be stored in the key-value store")
            }
        })
    }
}

impl KvCodec {
    /// The field type this codec encodes.
    pub fn field_type(&self) -> FieldType {
        match self {
            KvCodec::Float => FieldType::Float,
            KvCodec::String => FieldType::String,
            KvCodec::Bytes => FieldType::Bytes,
            KvCodec::Timestamp => FieldType::Timestamp,
        }
    }

    /// Encode a non-null value.
    pub fn encode(&self, value: &Value) -> WidecolResult<Bytes> {
        Ok(match (self, value) {
            (KvCodec::Float, Value::Float(v)) => Bytes::copy_from_slice(&v.to_le_bytes()),
            (KvCodec::String, Value::Text(v)) => Bytes::copy_from_slice(v.as_bytes()),
            (KvCodec::Bytes, Value::Bytes(v)) => v.clone(),
            (KvCodec::Timestamp, Value::Timestamp(v)) => Bytes::copy_from_slice(&v.to_le_bytes()),
            (codec, other) => widecol_bail!(TypeMismatch: codec.field_type(), other.kind()),
        })
    }

    /// Decode bytes previously produced by [`KvCodec::encode`].
    ///
    /// Bytes that cannot have come from this codec are reported as storage backend corruption.
    pub fn decode(&self, bytes: Bytes) -> WidecolResult<Value> {
        Ok(match self {
            KvCodec::Float => Value::Float(f64::from_le_bytes(self.fixed_width(&bytes)?)),
            KvCodec::String => Value::Text(
                std::str::from_utf8(&bytes)
                    .map_err(|err| widecol_err!(StorageBackend: "corrupt string value: {err}"))?
                    .into(),
            ),
            KvCodec::Bytes => Value::Bytes(bytes),
            KvCodec::Timestamp => Value::Timestamp(i64::from_le_bytes(self.fixed_width(&bytes)?)),
        })
    }

    fn fixed_width(&self, bytes: &[u8]) -> WidecolResult<[u8; 8]> {
        <[u8; 8]>::try_from(bytes).map_err(|_| {
            widecol_err!(
                StorageBackend: "corrupt {} value: expected 8 bytes, found {}",
                self.field_type(),
                bytes.len()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(KvCodec::Float, Value::Float(0.91))]
    #[case(KvCodec::Float, Value::Float(-0.0))]
    #[case(KvCodec::Float, Value::Float(f64::MAX))]
    #[case(KvCodec::String, Value::from("u1"))]
    #[case(KvCodec::String, Value::from(""))]
    #[case(KvCodec::String, Value::from("naïve ☃"))]
    #[case(KvCodec::Bytes, Value::from(vec![0u8, 255, 7]))]
    #[case(KvCodec::Bytes, Value::from(Vec::<u8>::new()))]
    #[case(KvCodec::Timestamp, Value::Timestamp(1_700_000_000_123_456))]
    #[case(KvCodec::Timestamp, Value::Timestamp(-1))]
    fn round_trip(#[case] codec: KvCodec, #[case] value: Value) {
        let encoded = codec.encode(&value).unwrap();
        assert_eq!(codec.decode(encoded).unwrap(), value);
    }

    #[test]
    fn float_is_little_endian_ieee754() {
        let encoded = KvCodec::Float.encode(&Value::Float(1.0)).unwrap();
        assert_eq!(&encoded[..], &[0u8, 0, 0, 0, 0, 0, 0xf0, 0x3f]);
    }

    #[rstest]
    #[case(FieldType::Unknown)]
    #[case(FieldType::Bitmapped)]
    #[case(FieldType::BitSlicedInt)]
    fn unsupported_types(#[case] field_type: FieldType) {
        let err = KvCodec::try_from(field_type).unwrap_err();
        assert!(matches!(err, WidecolError::UnsupportedType(..)));
    }

    #[rstest]
    #[case(KvCodec::Float, Value::Int(1))]
    #[case(KvCodec::String, Value::from(vec![b'a']))]
    #[case(KvCodec::Bytes, Value::from("a"))]
    #[case(KvCodec::Timestamp, Value::Int(5))]
    fn mismatched_values(#[case] codec: KvCodec, #[case] value: Value) {
        assert!(codec.encode(&value).unwrap_err().is_type_mismatch());
    }

    #[test]
    fn corrupt_bytes() {
        let err = KvCodec::Float.decode(Bytes::from_static(b"abc")).unwrap_err();
        assert!(err.is_storage_backend());
        assert!(err.to_string().contains("expected 8 bytes, found 3"));

        let err = KvCodec::String
            .decode(Bytes::from_static(&[0xff, 0xfe]))
            .unwrap_err();
        assert!(err.is_storage_backend());
    }
}
