use crate::bits::bits2int;
use crate::curve::repr_len;
use crate::errors::{DecodeError, SigningError, VerifyError};
use crate::nonces::{NonceGenerator, MAX_NONCE_ATTEMPTS};
use crate::{Curve, Signature};

use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::Digest;
use subtle::ConstantTimeEq as _;

use std::fmt;

/// Parses a big-endian secret key, left-padding it with zeros if it is
/// shorter than the curve's scalar width. The key must be in `[1, q-1]`.
fn parse_secret_key<C: Curve, T>(bytes: &[u8]) -> Result<C::Scalar, DecodeError<T>> {
    let mut repr = C::Repr::default();
    let width = repr.as_ref().len();
    if bytes.is_empty() || bytes.len() > width {
        return Err(DecodeError::bad_length(bytes.len()));
    }
    repr.as_mut()[width - bytes.len()..].copy_from_slice(bytes);

    match C::scalar_from_repr(&repr) {
        Some(x) if !C::is_zero(&x) => Ok(x),
        _ => Err(DecodeError::invalid_scalar()),
    }
}

/// The signing loop. Draws nonce candidates until one yields a
/// signature with nonzero `r` and `s`.
fn sign_with_scalar<C, D>(x: &C::Scalar, h1: &[u8]) -> Result<Signature<C>, SigningError>
where
    C: Curve,
    D: Digest + BlockSizeUser,
{
    if h1.is_empty() {
        return Err(SigningError::EmptyDigest);
    }

    // The signature equation uses bits2int(h1), not bits2octets(h1).
    let e = C::reduce_repr(&bits2int::<C>(h1));

    let mut nonces = NonceGenerator::<C, D>::new(x, h1);
    for _ in 0..MAX_NONCE_ATTEMPTS {
        let k = match C::scalar_from_repr(&nonces.next()) {
            Some(k) if !C::is_zero(&k) => k,
            _ => continue,
        };

        let Some(rx) = C::base_mul_x(&k) else {
            continue;
        };
        let r = C::reduce_repr(&rx);
        if C::is_zero(&r) {
            continue;
        }

        let Some(k_inv) = C::invert(&k) else {
            continue;
        };
        let s = k_inv * (e + r * *x);
        if C::is_zero(&s) {
            continue;
        }

        return Ok(Signature { r, s });
    }

    Err(SigningError::NonceExhausted)
}

/// Creates a deterministic ECDSA signature on a message digest, deriving
/// the nonce with [RFC6979](https://www.rfc-editor.org/rfc/rfc6979).
///
/// - `C` is the curve.
/// - `D` is the hash function. Its HMAC drives the nonce generator, and
///   `digest` should be the output of the same hash function applied to
///   the message.
/// - `seckey` is the big-endian secret key. Encodings shorter than the
///   curve's scalar width are left-padded with zeros.
///
/// The digest may be of any non-zero length. If it is longer than the
/// curve order, its low-order bits are ignored.
///
/// Signing the same digest with the same key and hash function always
/// produces the same signature. The `s` value is NOT normalized; use
/// [`Signature::normalize_s`] if a low-`s` signature is required.
///
/// ```
/// use deterministic_ecdsa::{sign, NistP256, Signature};
/// use sha2::{Digest, Sha256};
///
/// let seckey = base16ct::mixed::decode_vec(
///     "C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"
/// ).unwrap();
///
/// let signature: Signature<NistP256> =
///     sign::<NistP256, Sha256>(&seckey, Sha256::digest(b"sample")).unwrap();
///
/// assert_eq!(
///     format!("{:X}", signature),
///     "EFD48B2AACB6A8FD1140DD9CD45E81D69D2C877B56AAF991C34D0EA84EAF3716\
///      F7CB1C942D657C41D436C7A1B6E29F65F3E900DBB9AFF4064DC4AB2F843ACDA8"
/// );
/// ```
pub fn sign<C, D>(
    seckey: impl AsRef<[u8]>,
    digest: impl AsRef<[u8]>,
) -> Result<Signature<C>, SigningError>
where
    C: Curve,
    D: Digest + BlockSizeUser,
{
    let x = parse_secret_key::<C, SigningKey<C>>(seckey.as_ref())?;
    sign_with_scalar::<C, D>(&x, digest.as_ref())
}

/// Hashes a message with `D`, and then signs the resulting digest with
/// [`sign`].
pub fn sign_message<C, D>(
    seckey: impl AsRef<[u8]>,
    message: impl AsRef<[u8]>,
) -> Result<Signature<C>, SigningError>
where
    C: Curve,
    D: Digest + BlockSizeUser,
{
    sign::<C, D>(seckey, D::digest(message))
}

/// Verifies an ECDSA signature on a message digest, under a given public key.
///
/// The digest is truncated to the bit length of the curve order in the
/// same way as when signing. Returns an error if the signature is invalid.
pub fn verify<C: Curve>(
    pubkey: &C::PublicKey,
    digest: impl AsRef<[u8]>,
    signature: &Signature<C>,
) -> Result<(), VerifyError> {
    use VerifyError::BadSignature;

    let digest = digest.as_ref();
    if digest.is_empty() {
        return Err(VerifyError::EmptyDigest);
    }

    let e = C::reduce_repr(&bits2int::<C>(digest));
    let w = C::invert(&signature.s).ok_or(BadSignature)?;
    let u1 = e * w;
    let u2 = signature.r * w;

    let x = C::lincomb_x(&u1, pubkey, &u2).ok_or(BadSignature)?;
    let v = C::scalar_to_repr(&C::reduce_repr(&x));
    let r = C::scalar_to_repr(&signature.r);

    if bool::from(v.as_ref().ct_eq(r.as_ref())) {
        Ok(())
    } else {
        Err(BadSignature)
    }
}

/// A validated ECDSA secret key on the curve `C`, paired with its
/// public key.
///
/// The secret scalar is never printed by the `Debug` implementation.
pub struct SigningKey<C: Curve> {
    secret: C::Scalar,
    pubkey: C::PublicKey,
}

impl<C: Curve> SigningKey<C> {
    /// Parses a big-endian secret key. Encodings shorter than the curve's
    /// scalar width are left-padded with zeros.
    ///
    /// Fails if the key is empty, longer than `rlen / 8` bytes, or not an
    /// integer in the range `[1, q-1]`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError<Self>> {
        let secret = parse_secret_key::<C, Self>(bytes)?;
        let pubkey = C::public_key(&secret).ok_or_else(DecodeError::invalid_scalar)?;
        Ok(SigningKey { secret, pubkey })
    }

    /// Returns the public key `x·G`.
    pub fn verifying_key(&self) -> C::PublicKey {
        self.pubkey
    }

    /// Serializes the secret key as `rlen / 8` big-endian bytes.
    pub fn to_bytes(&self) -> C::Repr {
        C::scalar_to_repr(&self.secret)
    }

    /// Signs a message digest produced by the hash function `D`.
    /// See [`sign`].
    pub fn sign_prehash<D>(&self, digest: impl AsRef<[u8]>) -> Result<Signature<C>, SigningError>
    where
        D: Digest + BlockSizeUser,
    {
        sign_with_scalar::<C, D>(&self.secret, digest.as_ref())
    }

    /// Hashes a message with `D` and signs the resulting digest.
    pub fn sign_message<D>(&self, message: impl AsRef<[u8]>) -> Result<Signature<C>, SigningError>
    where
        D: Digest + BlockSizeUser,
    {
        self.sign_prehash::<D>(D::digest(message))
    }

    /// Verifies a signature on a message digest under this key's public key.
    pub fn verify_prehash(
        &self,
        digest: impl AsRef<[u8]>,
        signature: &Signature<C>,
    ) -> Result<(), VerifyError> {
        verify::<C>(&self.pubkey, digest, signature)
    }
}

impl<C: Curve> Clone for SigningKey<C> {
    fn clone(&self) -> Self {
        SigningKey {
            secret: self.secret,
            pubkey: self.pubkey,
        }
    }
}

impl<C: Curve> fmt::Debug for SigningKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("secret", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl<C: Curve> TryFrom<&[u8]> for SigningKey<C> {
    type Error = DecodeError<Self>;

    /// Same as [`SigningKey::from_bytes`].
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl<C: Curve> std::str::FromStr for SigningKey<C> {
    type Err = DecodeError<Self>;

    /// Parses a secret key from a big-endian hex string, which can be
    /// either upper or lower case.
    fn from_str(hex: &str) -> Result<Self, Self::Err> {
        if hex.len() > repr_len::<C>() * 2 {
            return Err(DecodeError::bad_length(hex.len() / 2));
        }
        let bytes = base16ct::mixed::decode_vec(hex)?;
        Self::from_bytes(&bytes)
    }
}
