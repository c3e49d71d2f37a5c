//! Conversions between bit strings, octet strings and integers, as defined in
//! [Section 2.3 of RFC6979](https://www.rfc-editor.org/rfc/rfc6979#section-2.3).
//!
//! Integers are always carried as big-endian encodings of exactly
//! `rlen / 8` bytes, i.e. as [`Curve::Repr`] values.

use crate::Curve;

/// Interprets a bit string as a big-endian integer of at most `qlen` bits.
///
/// If the input is longer than `qlen` bits, the excess _low-order_ bits are
/// discarded by shifting right, so that the leftmost `qlen` bits are kept.
/// This is a bit-level truncation: when `qlen` is not a multiple of 8, the
/// result is not a prefix of the input bytes.
///
/// If the input is shorter than `qlen` bits, it is left-padded with zeros.
pub fn bits2int<C: Curve>(bits: &[u8]) -> C::Repr {
    let qlen = C::ORDER_BITS;
    let mut out = C::Repr::default();
    let out_bytes = out.as_mut();

    let blen = bits.len() * 8;
    if blen <= qlen {
        let offset = out_bytes.len() - bits.len();
        out_bytes[offset..].copy_from_slice(bits);
        return out;
    }

    // Dropping whole trailing bytes first leaves exactly `qlen + bit_shift`
    // bits, which always occupy the same number of bytes as the output.
    let shift = blen - qlen;
    let kept = &bits[..bits.len() - shift / 8];
    let bit_shift = (shift % 8) as u32;

    if bit_shift == 0 {
        out_bytes.copy_from_slice(kept);
        return out;
    }

    let mut carry = 0u8;
    for (dst, &src) in out_bytes.iter_mut().zip(kept) {
        *dst = (src >> bit_shift) | carry;
        carry = src << (8 - bit_shift);
    }
    out
}

/// Encodes a scalar as `rlen / 8` big-endian bytes.
pub fn int2octets<C: Curve>(x: &C::Scalar) -> C::Repr {
    C::scalar_to_repr(x)
}

/// Converts a bit string to an integer modulo `q`, encoded as `rlen / 8`
/// bytes. Since `bits2int` never exceeds `2^qlen`, the reduction amounts
/// to at most one subtraction of `q`.
pub fn bits2octets<C: Curve>(bits: &[u8]) -> C::Repr {
    let z1 = bits2int::<C>(bits);
    int2octets::<C>(&C::reduce_repr(&z1))
}
