use crate::curve::{is_high, repr_len};
use crate::errors::DecodeError;
use crate::Curve;

use std::fmt;

/// An ECDSA signature `(r, s)` over the curve `C`.
///
/// Both `r` and `s` are always in the range `[1, q-1]`. Signatures produced
/// by [`sign`][crate::sign] are guaranteed to satisfy this, and decoding
/// from bytes or hex enforces it.
///
/// The binary encoding is the fixed-width concatenation `r || s`, where each
/// half is `rlen / 8` big-endian bytes. So a P-256 signature is 64 bytes and
/// a P-521 signature is 132 bytes.
pub struct Signature<C: Curve> {
    pub(crate) r: C::Scalar,
    pub(crate) s: C::Scalar,
}

impl<C: Curve> Signature<C> {
    /// Constructs a signature from its two scalar components. Returns `None`
    /// if either scalar is zero.
    pub fn from_scalars(r: C::Scalar, s: C::Scalar) -> Option<Self> {
        if C::is_zero(&r) || C::is_zero(&s) {
            return None;
        }
        Some(Signature { r, s })
    }

    /// Returns the `r` component of the signature.
    pub fn r(&self) -> C::Scalar {
        self.r
    }

    /// Returns the `s` component of the signature.
    pub fn s(&self) -> C::Scalar {
        self.s
    }

    /// Splits the signature into its `(r, s)` components.
    pub fn split(&self) -> (C::Scalar, C::Scalar) {
        (self.r, self.s)
    }

    /// Returns true if `s` is at most `(q-1) / 2`.
    ///
    /// Some protocols, notably Bitcoin, require signatures to have a low `s`
    /// value to prevent third parties from malleating them. This crate
    /// does not normalize signatures on its own, so that its output matches
    /// the test vectors of RFC6979 exactly. Use [`normalize_s`][Self::normalize_s]
    /// where low-`s` signatures are needed.
    pub fn is_low_s(&self) -> bool {
        !is_high::<C>(&self.s)
    }

    /// Returns the equivalent signature `(r, q - s)` if `s` is high,
    /// or a copy of `self` otherwise. Both signatures verify under the
    /// same key and digest.
    pub fn normalize_s(&self) -> Self {
        if self.is_low_s() {
            return *self;
        }
        Signature {
            r: self.r,
            s: -self.s,
        }
    }

    /// Serializes the signature as `r || s`, with each scalar encoded
    /// as `rlen / 8` big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut serialized = Vec::with_capacity(repr_len::<C>() * 2);
        serialized.extend_from_slice(C::scalar_to_repr(&self.r).as_ref());
        serialized.extend_from_slice(C::scalar_to_repr(&self.s).as_ref());
        serialized
    }

    /// Parses a signature from its fixed-width `r || s` encoding.
    ///
    /// Fails if the slice is not exactly twice the scalar width of the
    /// curve, or if either scalar is zero or not less than the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError<Self>> {
        let width = repr_len::<C>();
        if bytes.len() != width * 2 {
            return Err(DecodeError::bad_length(bytes.len()));
        }

        let r =
            parse_nonzero_scalar::<C>(&bytes[..width]).ok_or_else(DecodeError::invalid_scalar)?;
        let s =
            parse_nonzero_scalar::<C>(&bytes[width..]).ok_or_else(DecodeError::invalid_scalar)?;
        Ok(Signature { r, s })
    }

    /// Parses a signature from a hex string, which can be either upper or
    /// lower case. The decoded bytes must match the format returned by
    /// [`to_bytes`][Self::to_bytes].
    pub fn from_hex(hex: &str) -> Result<Self, DecodeError<Self>> {
        hex.parse()
    }
}

fn parse_nonzero_scalar<C: Curve>(bytes: &[u8]) -> Option<C::Scalar> {
    let mut repr = C::Repr::default();
    repr.as_mut().copy_from_slice(bytes);
    C::scalar_from_repr(&repr).filter(|scalar| !C::is_zero(scalar))
}

mod encodings {
    use super::*;

    // Derives would place bounds on `C` rather than on `C::Scalar`.

    impl<C: Curve> Clone for Signature<C> {
        fn clone(&self) -> Self {
            *self
        }
    }

    impl<C: Curve> Copy for Signature<C> {}

    impl<C: Curve> PartialEq for Signature<C> {
        fn eq(&self, other: &Self) -> bool {
            self.r == other.r && self.s == other.s
        }
    }

    impl<C: Curve> Eq for Signature<C> {}

    impl<C: Curve> fmt::Debug for Signature<C> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.debug_struct("Signature")
                .field(
                    "r",
                    &base16ct::lower::encode_string(C::scalar_to_repr(&self.r).as_ref()),
                )
                .field(
                    "s",
                    &base16ct::lower::encode_string(C::scalar_to_repr(&self.s).as_ref()),
                )
                .finish()
        }
    }

    impl<C: Curve> fmt::LowerHex for Signature<C> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(&base16ct::lower::encode_string(&self.to_bytes()))
        }
    }

    impl<C: Curve> fmt::UpperHex for Signature<C> {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(&base16ct::upper::encode_string(&self.to_bytes()))
        }
    }

    impl<C: Curve> fmt::Display for Signature<C> {
        /// Formats the signature as a lower-case hex string.
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "{:x}", self)
        }
    }

    impl<C: Curve> std::str::FromStr for Signature<C> {
        type Err = DecodeError<Self>;

        /// Parses a signature from a hex string, which can be either upper or
        /// lower case.
        ///
        /// Same as [`Signature::from_hex`].
        fn from_str(hex: &str) -> Result<Self, Self::Err> {
            let bytes = base16ct::mixed::decode_vec(hex)?;
            Self::from_bytes(&bytes)
        }
    }

    impl<C: Curve> TryFrom<&[u8]> for Signature<C> {
        type Error = DecodeError<Self>;

        /// Same as [`Signature::from_bytes`].
        fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
            Self::from_bytes(bytes)
        }
    }

    impl<C: Curve> From<Signature<C>> for Vec<u8> {
        fn from(signature: Signature<C>) -> Self {
            signature.to_bytes()
        }
    }

    #[cfg(feature = "serde")]
    impl<C: Curve> serde::Serialize for Signature<C> {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serdect::slice::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
        }
    }

    #[cfg(feature = "serde")]
    impl<'de, C: Curve> serde::Deserialize<'de> for Signature<C> {
        /// Deserializes a signature from a byte vector or a hex
        /// string, depending on the human-readability of the data format.
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
            Signature::from_bytes(&bytes).map_err(|_| {
                serde::de::Error::invalid_value(
                    serde::de::Unexpected::Bytes(&bytes),
                    &"a byte vector representing an ECDSA signature",
                )
            })
        }
    }
}
