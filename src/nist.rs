//! Support for the NIST prime-order curves, and for any other curve from the
//! RustCrypto [`elliptic_curve`] ecosystem which exposes full arithmetic.

use crate::Curve;

use elliptic_curve::{
    ff::{Field as _, PrimeField},
    group::{Curve as _, Group as _},
    ops::Reduce,
    point::AffineCoordinates as _,
    AffinePoint, CurveArithmetic, FieldBytes, ProjectivePoint, Scalar,
};

pub use p224::NistP224;
pub use p256::NistP256;
pub use p384::NistP384;
pub use p521::NistP521;

fn x_coordinate<C: CurveArithmetic>(point: ProjectivePoint<C>) -> Option<FieldBytes<C>> {
    if bool::from(point.is_identity()) {
        return None;
    }
    Some(point.to_affine().x())
}

impl<C: CurveArithmetic> Curve for C {
    type Scalar = Scalar<C>;
    type Repr = FieldBytes<C>;
    type PublicKey = AffinePoint<C>;

    const ORDER_BITS: usize = <Scalar<C> as PrimeField>::NUM_BITS as usize;

    fn scalar_from_repr(repr: &FieldBytes<C>) -> Option<Scalar<C>> {
        Scalar::<C>::from_repr(repr.clone()).into()
    }

    fn reduce_repr(repr: &FieldBytes<C>) -> Scalar<C> {
        <Scalar<C> as Reduce<C::Uint>>::reduce_bytes(repr)
    }

    fn scalar_to_repr(scalar: &Scalar<C>) -> FieldBytes<C> {
        scalar.to_repr()
    }

    fn is_zero(scalar: &Scalar<C>) -> bool {
        scalar.is_zero().into()
    }

    fn invert(scalar: &Scalar<C>) -> Option<Scalar<C>> {
        scalar.invert().into()
    }

    fn base_mul_x(k: &Scalar<C>) -> Option<FieldBytes<C>> {
        x_coordinate::<C>(ProjectivePoint::<C>::generator() * k)
    }

    fn public_key(secret: &Scalar<C>) -> Option<AffinePoint<C>> {
        let point = ProjectivePoint::<C>::generator() * secret;
        if bool::from(point.is_identity()) {
            return None;
        }
        Some(point.to_affine())
    }

    fn lincomb_x(
        u1: &Scalar<C>,
        pubkey: &AffinePoint<C>,
        u2: &Scalar<C>,
    ) -> Option<FieldBytes<C>> {
        let pubkey = ProjectivePoint::<C>::from(*pubkey);
        x_coordinate::<C>(ProjectivePoint::<C>::generator() * u1 + pubkey * u2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_bytes<C: CurveArithmetic>(hex: &str) -> FieldBytes<C> {
        FieldBytes::<C>::clone_from_slice(&base16ct::mixed::decode_vec(hex).unwrap())
    }

    #[test]
    fn test_order_bit_lengths() {
        assert_eq!(<NistP224 as Curve>::ORDER_BITS, 224);
        assert_eq!(<NistP256 as Curve>::ORDER_BITS, 256);
        assert_eq!(<NistP384 as Curve>::ORDER_BITS, 384);
        assert_eq!(<NistP521 as Curve>::ORDER_BITS, 521);

        assert_eq!(crate::curve::repr_len::<NistP224>(), 28);
        assert_eq!(crate::curve::repr_len::<NistP521>(), 66);
        assert_eq!(FieldBytes::<NistP521>::default().len(), 66);
    }

    #[test]
    fn test_scalar_range_checks() {
        let q_minus_one = field_bytes::<NistP256>(
            "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632550",
        );
        let q = field_bytes::<NistP256>(
            "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551",
        );

        assert!(NistP256::scalar_from_repr(&q_minus_one).is_some());
        assert!(NistP256::scalar_from_repr(&q).is_none());
        assert!(NistP256::is_zero(&NistP256::reduce_repr(&q)));

        let zero = NistP256::reduce_repr(&FieldBytes::<NistP256>::default());
        assert!(NistP256::is_zero(&zero));
        assert!(NistP256::invert(&zero).is_none());
        assert!(NistP256::base_mul_x(&zero).is_none());
    }

    #[test]
    fn test_public_key_derivation() {
        // https://www.rfc-editor.org/rfc/rfc6979#appendix-A.2.5
        let secret = field_bytes::<NistP256>(
            "C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721",
        );
        let secret = NistP256::scalar_from_repr(&secret).unwrap();

        let pubkey = NistP256::public_key(&secret).unwrap();
        assert_eq!(
            base16ct::upper::encode_string(&pubkey.x()),
            "60FED4BA255A9D31C961EB74C6356D68C049B8923B61FA6CE669622E60F29FB6"
        );
        assert_eq!(NistP256::base_mul_x(&secret), Some(pubkey.x()));

        // https://www.rfc-editor.org/rfc/rfc6979#appendix-A.2.7
        let secret = field_bytes::<NistP521>(
            "00FAD06DAA62BA3B25D2FB40133DA757205DE67F5BB0018FEE8C86E1B68C7E75\
             CAA896EB32F1F47C70855836A6D16FCC1466F6D8FBEC67DB89EC0C08B0E996B83538",
        );
        let secret = NistP521::scalar_from_repr(&secret).unwrap();
        let pubkey = NistP521::public_key(&secret).unwrap();
        assert_eq!(
            base16ct::upper::encode_string(&pubkey.x()),
            "01894550D0785932E00EAA23B694F213F8C3121F86DC97A04E5A7167DB4E5BCD37\
             1123D46E45DB6B5D5370A7F20FB633155D38FFA16D2BD761DCAC474B9A2F5023A4"
        );
    }
}
