use std::ops::{Add, Mul, Neg};

/// The elliptic curve and scalar arithmetic consumed by deterministic signing.
///
/// Implementors bundle three capabilities: the prime-order group with its
/// base point `G`, arithmetic on scalars modulo the group order `q`, and
/// conversion between scalars and their fixed-width big-endian encoding.
///
/// Every type of the RustCrypto `elliptic_curve` ecosystem which implements
/// [`CurveArithmetic`][elliptic_curve::CurveArithmetic] is a `Curve` (see
/// [`NistP256`][crate::NistP256] and friends). With the `secp256k1` or `k256`
/// features enabled, [`Secp256k1`][crate::Secp256k1] is also available.
pub trait Curve {
    /// An integer modulo the group order `q`, including zero.
    type Scalar: Copy
        + PartialEq
        + Add<Output = Self::Scalar>
        + Mul<Output = Self::Scalar>
        + Neg<Output = Self::Scalar>;

    /// Big-endian encoding of an integer of `rlen` bits, where
    /// `rlen = ceil(ORDER_BITS / 8) * 8`. The encoding is always exactly
    /// `rlen / 8` bytes long.
    type Repr: AsRef<[u8]> + AsMut<[u8]> + Default + Clone;

    /// A valid (non-identity) point on the curve, used as a public key.
    type PublicKey: Copy;

    /// The bit length of the group order `q`, also called `qlen`.
    const ORDER_BITS: usize;

    /// Parses a canonical scalar. Returns `None` if the encoded integer
    /// is greater than or equal to `q`. Zero is a valid result.
    fn scalar_from_repr(repr: &Self::Repr) -> Option<Self::Scalar>;

    /// Reduces an arbitrary `rlen`-bit integer modulo `q`.
    fn reduce_repr(repr: &Self::Repr) -> Self::Scalar;

    /// Encodes a scalar as `rlen / 8` big-endian bytes.
    fn scalar_to_repr(scalar: &Self::Scalar) -> Self::Repr;

    /// Returns true if the scalar is zero.
    fn is_zero(scalar: &Self::Scalar) -> bool;

    /// Computes the multiplicative inverse of a scalar modulo `q`.
    /// Returns `None` for zero.
    fn invert(scalar: &Self::Scalar) -> Option<Self::Scalar>;

    /// Computes `k·G` and returns the big-endian encoding of its
    /// x-coordinate, or `None` if the result is the point at infinity.
    fn base_mul_x(k: &Self::Scalar) -> Option<Self::Repr>;

    /// Computes the public key `x·G`. Returns `None` for a zero secret.
    fn public_key(secret: &Self::Scalar) -> Option<Self::PublicKey>;

    /// Computes `u1·G + u2·Q` and returns the encoding of its x-coordinate,
    /// or `None` if the sum is the point at infinity.
    fn lincomb_x(
        u1: &Self::Scalar,
        pubkey: &Self::PublicKey,
        u2: &Self::Scalar,
    ) -> Option<Self::Repr>;
}

/// Returns the byte length `rlen / 8` of the scalar encoding for curve `C`.
pub(crate) const fn repr_len<C: Curve>() -> usize {
    C::ORDER_BITS.div_ceil(8)
}

/// Returns true if `s > (q - 1) / 2`.
///
/// For `s` in `[0, q)` with odd `q`, `2s mod q` is odd exactly when
/// `2s >= q`.
pub(crate) fn is_high<C: Curve>(s: &C::Scalar) -> bool {
    let doubled = C::scalar_to_repr(&(*s + *s));
    doubled.as_ref().last().is_some_and(|byte| byte & 1 == 1)
}
