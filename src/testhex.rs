//! Helpers for deserializing hex fields of the test vector CSV files.

struct HexVisitor;

impl<'de> serde::de::Visitor<'de> for HexVisitor {
    type Value = Vec<u8>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a hex string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        base16ct::mixed::decode_vec(v)
            .map_err(|_| E::invalid_value(serde::de::Unexpected::Str(v), &"a hex string"))
    }
}

/// Deserializes a hex string field into a byte vector.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserializer.deserialize_str(HexVisitor)
}

/// Decodes a hex string into the fixed-width scalar encoding of the
/// curve `C`, left-padding it with zeros if it is short.
pub fn decode_repr<C: crate::Curve>(hex: &str) -> C::Repr {
    let bytes = base16ct::mixed::decode_vec(hex).unwrap();
    let mut repr = C::Repr::default();
    let offset = repr.as_ref().len() - bytes.len();
    repr.as_mut()[offset..].copy_from_slice(&bytes);
    repr
}

/// Decodes a hex string into a scalar of the curve `C`.
pub fn decode_scalar<C: crate::Curve>(hex: &str) -> C::Scalar {
    C::scalar_from_repr(&decode_repr::<C>(hex)).unwrap()
}
