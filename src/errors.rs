//! Various error types for different kinds of failures.

use std::error::Error;
use std::fmt;

/// Error returned when signing fails.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SigningError {
    /// The secret key is not an integer in the range `[1, q-1]`,
    /// or its encoding is longer than the curve's scalar width.
    InvalidSecretKey,

    /// The message digest was empty.
    EmptyDigest,

    /// The nonce generator failed to produce a usable nonce within
    /// [`MAX_NONCE_ATTEMPTS`][crate::MAX_NONCE_ATTEMPTS] candidates.
    /// This cannot happen with a correctly implemented curve, and
    /// indicates a broken [`Curve`][crate::Curve] implementation.
    NonceExhausted,
}
impl fmt::Display for SigningError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "failed to create signature: {}",
            match self {
                Self::InvalidSecretKey => "secret key is out of range",
                Self::EmptyDigest => "message digest is empty",
                Self::NonceExhausted => "no valid nonce found; curve arithmetic is broken",
            }
        )
    }
}
impl Error for SigningError {}

/// Error returned when verification fails.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VerifyError {
    /// The message digest was empty.
    EmptyDigest,

    /// The signature is not valid for the given key and digest.
    BadSignature,
}
impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "failed to verify signature: {}",
            match self {
                Self::EmptyDigest => "message digest is empty",
                Self::BadSignature => "signature is invalid",
            }
        )
    }
}
impl Error for VerifyError {}

/// Enumerates the various reasons why binary or hex decoding
/// could fail.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DecodeFailureReason {
    /// The hex string's format was incorrect, which could mean
    /// it either was the wrong length or held invalid characters.
    BadHexFormat(base16ct::Error),

    /// The byte slice we tried to deserialize had the wrong length.
    BadLength(usize),

    /// The bytes contained a scalar which is zero or is not
    /// less than the curve order.
    InvalidScalar,
}

/// Returned when decoding a certain data structure of type `T` fails.
///
/// The type `T` only serves as a compile-time safety check; no
/// data of type `T` is actually owned by this error.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DecodeError<T> {
    /// The reason for the decoding failure.
    pub reason: DecodeFailureReason,
    phantom: std::marker::PhantomData<T>,
}

impl<T> DecodeError<T> {
    /// Construct a new decoding error for type `T` given a cause
    /// for the failure.
    pub fn new(reason: DecodeFailureReason) -> Self {
        DecodeError {
            reason,
            phantom: std::marker::PhantomData,
        }
    }

    /// Create a decoding error caused by an incorrect input byte
    /// slice length.
    pub fn bad_length(size: usize) -> Self {
        let reason = DecodeFailureReason::BadLength(size);
        DecodeError::new(reason)
    }

    /// Create a decoding error caused by an out-of-range scalar.
    pub fn invalid_scalar() -> Self {
        DecodeError::new(DecodeFailureReason::InvalidScalar)
    }
}

impl<T> fmt::Display for DecodeError<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use DecodeFailureReason::*;

        write!(
            f,
            "error decoding {}: {}",
            std::any::type_name::<T>(),
            match &self.reason {
                BadHexFormat(e) => format!("hex decoding error: {}", e),
                BadLength(size) => format!("unexpected length {}", size),
                InvalidScalar => "scalar is zero or exceeds the curve order".to_string(),
            }
        )
    }
}

impl<T: fmt::Debug> Error for DecodeError<T> {}

impl<T> From<base16ct::Error> for DecodeError<T> {
    fn from(e: base16ct::Error) -> Self {
        DecodeError::new(DecodeFailureReason::BadHexFormat(e))
    }
}

impl<T> From<DecodeError<T>> for SigningError {
    fn from(_: DecodeError<T>) -> Self {
        SigningError::InvalidSecretKey
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NistP256, Signature};

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SigningError::NonceExhausted.to_string(),
            "failed to create signature: no valid nonce found; curve arithmetic is broken"
        );
        assert_eq!(
            VerifyError::BadSignature.to_string(),
            "failed to verify signature: signature is invalid"
        );

        let err = DecodeError::<Signature<NistP256>>::bad_length(3);
        assert!(err.to_string().ends_with(": unexpected length 3"));
        assert_eq!(SigningError::from(err), SigningError::InvalidSecretKey);

        let err = DecodeError::<Signature<NistP256>>::invalid_scalar();
        assert!(err
            .to_string()
            .ends_with(": scalar is zero or exceeds the curve order"));

        let err = DecodeError::<Signature<NistP256>>::from(base16ct::Error::InvalidLength);
        assert_eq!(
            err.reason,
            DecodeFailureReason::BadHexFormat(base16ct::Error::InvalidLength)
        );
    }
}
