//! The secp256k1 curve, with arithmetic provided by the [`secp`] crate.
//!
//! Whether `secp` is backed by `libsecp256k1` or by the pure-rust `k256`
//! crate depends on whether the `secp256k1` or `k256` feature is enabled.

use crate::Curve;

use secp::{MaybePoint, MaybeScalar, Point, G};

/// The secp256k1 curve used by Bitcoin and many other systems.
///
/// Scalars are represented as [`MaybeScalar`], so that zero is
/// representable as an intermediate value, and public keys are
/// represented as [`Point`].
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Secp256k1;

fn x_coordinate(point: MaybePoint) -> Option<[u8; 32]> {
    match point {
        MaybePoint::Valid(point) => Some(point.serialize_xonly()),
        MaybePoint::Infinity => None,
    }
}

impl Curve for Secp256k1 {
    type Scalar = MaybeScalar;
    type Repr = [u8; 32];
    type PublicKey = Point;

    const ORDER_BITS: usize = 256;

    fn scalar_from_repr(repr: &[u8; 32]) -> Option<MaybeScalar> {
        MaybeScalar::try_from(repr.as_slice()).ok()
    }

    fn reduce_repr(repr: &[u8; 32]) -> MaybeScalar {
        MaybeScalar::reduce_from(repr)
    }

    fn scalar_to_repr(scalar: &MaybeScalar) -> [u8; 32] {
        scalar.serialize()
    }

    fn is_zero(scalar: &MaybeScalar) -> bool {
        *scalar == MaybeScalar::Zero
    }

    fn invert(scalar: &MaybeScalar) -> Option<MaybeScalar> {
        match scalar {
            MaybeScalar::Valid(scalar) => Some(MaybeScalar::Valid(scalar.invert())),
            MaybeScalar::Zero => None,
        }
    }

    fn base_mul_x(k: &MaybeScalar) -> Option<[u8; 32]> {
        x_coordinate(*k * G)
    }

    fn public_key(secret: &MaybeScalar) -> Option<Point> {
        match secret {
            MaybeScalar::Valid(secret) => Some(secret.base_point_mul()),
            MaybeScalar::Zero => None,
        }
    }

    fn lincomb_x(u1: &MaybeScalar, pubkey: &Point, u2: &MaybeScalar) -> Option<[u8; 32]> {
        x_coordinate(*u1 * G + *u2 * *pubkey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secp::Scalar;

    #[test]
    fn test_scalar_range_checks() {
        let n: [u8; 32] = base16ct::mixed::decode_vec(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        )
        .unwrap()
        .try_into()
        .unwrap();

        assert_eq!(Secp256k1::scalar_from_repr(&n), None);
        assert_eq!(Secp256k1::reduce_repr(&n), MaybeScalar::Zero);
        assert_eq!(
            Secp256k1::scalar_from_repr(&[0; 32]),
            Some(MaybeScalar::Zero)
        );
        assert_eq!(Secp256k1::invert(&MaybeScalar::Zero), None);
        assert_eq!(Secp256k1::base_mul_x(&MaybeScalar::Zero), None);
    }

    #[test]
    fn test_inversion() {
        let x = MaybeScalar::one() + MaybeScalar::one();
        let x_inv = Secp256k1::invert(&x).unwrap();
        assert_eq!(x * x_inv, MaybeScalar::one());
    }

    #[test]
    fn test_public_key_derivation() {
        let secret = MaybeScalar::Valid(Scalar::one());
        assert_eq!(Secp256k1::public_key(&secret), Some(Point::generator()));
        assert_eq!(
            Secp256k1::base_mul_x(&secret),
            Some(Point::generator().serialize_xonly())
        );
        assert_eq!(Secp256k1::public_key(&MaybeScalar::Zero), None);
    }
}
