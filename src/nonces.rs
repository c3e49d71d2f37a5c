//! Deterministic nonce generation using the restricted HMAC_DRBG of
//! [RFC6979 Section 3.2](https://www.rfc-editor.org/rfc/rfc6979#section-3.2).
//!
//! The nonce stream is a function of the secret key, the message digest,
//! the hash function and the curve alone. No randomness is involved, so
//! signing the same digest twice with the same key always uses the same
//! nonce, while any change to the digest yields an unrelated nonce.

use crate::bits::{bits2int, bits2octets, int2octets};
use crate::errors::SigningError;
use crate::Curve;

use hmac::digest::core_api::BlockSizeUser;
use hmac::digest::{Digest, Output};
use hmac::Mac as _;
use zeroize::Zeroize as _;

use std::marker::PhantomData;

/// The maximum number of nonce candidates we will draw before giving up.
///
/// Each candidate is rejected with probability roughly `2^-qlen` on the
/// curves supported here (somewhat more for orders just below a power of
/// two, as with secp256k1), so hitting this cap means the curve arithmetic
/// itself is broken.
pub const MAX_NONCE_ATTEMPTS: usize = 64;

fn new_hmac<D>(key: &[u8]) -> hmac::SimpleHmac<D>
where
    D: Digest + BlockSizeUser,
{
    hmac::SimpleHmac::<D>::new_from_slice(key).expect("SimpleHmac::new_from_slice never fails")
}

/// The `(K, V)` registers of the HMAC_DRBG. Zeroized on drop.
struct DrbgState<D>
where
    D: Digest + BlockSizeUser,
{
    /// HMAC key `K`.
    k: Output<D>,

    /// Chaining value `V`.
    v: Output<D>,
}

impl<D> DrbgState<D>
where
    D: Digest + BlockSizeUser,
{
    /// Seeds the DRBG from `int2octets(x)` and `bits2octets(h1)`
    /// (RFC6979 Section 3.2, steps b through g).
    fn seed(x_octets: &[u8], h1_octets: &[u8]) -> Self {
        // Steps B & C
        let mut v = Output::<D>::default();
        v.iter_mut().for_each(|b| *b = 0x01);
        let k = Output::<D>::default();

        // Step D:
        //  K = HMAC_K(V || 0x00 || int2octets(x) || bits2octets(h1))
        let mut k = new_hmac::<D>(&k)
            .chain_update(&v)
            .chain_update([0x00u8])
            .chain_update(x_octets)
            .chain_update(h1_octets)
            .finalize()
            .into_bytes();

        // Step E:
        //  V = HMAC_K(V)
        v = new_hmac::<D>(&k).chain_update(&v).finalize().into_bytes();

        // Step F:
        //  K = HMAC_K(V || 0x01 || int2octets(x) || bits2octets(h1))
        let next_k = new_hmac::<D>(&k)
            .chain_update(&v)
            .chain_update([0x01u8])
            .chain_update(x_octets)
            .chain_update(h1_octets)
            .finalize()
            .into_bytes();
        k[..].zeroize();
        let k = next_k;

        // Step G:
        //  V = HMAC_K(V)
        v = new_hmac::<D>(&k).chain_update(&v).finalize().into_bytes();

        DrbgState { k, v }
    }

    /// Step H2: produce at least `qlen` pseudorandom bits by iterating
    /// `V = HMAC_K(V)` and concatenating each `V`.
    fn generate(&mut self, qlen: usize) -> Vec<u8> {
        let mut t = Vec::with_capacity(qlen.div_ceil(8) + self.v.len());
        while t.len() * 8 < qlen {
            self.v = new_hmac::<D>(&self.k)
                .chain_update(&self.v)
                .finalize()
                .into_bytes();
            t.extend_from_slice(&self.v);
        }
        t
    }

    /// Step H3, failure branch: advance the state past the current
    /// candidate so the next call to `generate` yields a fresh one.
    fn reseed(&mut self) {
        //  K = HMAC_K(V || 0x00)
        self.k = new_hmac::<D>(&self.k)
            .chain_update(&self.v)
            .chain_update([0x00u8])
            .finalize()
            .into_bytes();
        //  V = HMAC_K(V)
        self.v = new_hmac::<D>(&self.k)
            .chain_update(&self.v)
            .finalize()
            .into_bytes();
    }
}

impl<D> Drop for DrbgState<D>
where
    D: Digest + BlockSizeUser,
{
    fn drop(&mut self) {
        self.k[..].zeroize();
        self.v[..].zeroize();
    }
}

/// Produces the deterministic sequence of nonce candidates for one
/// `(secret key, digest)` pair, using the hash function `D` to drive HMAC.
///
/// Each call to [`next`][Self::next] returns a new candidate `k`,
/// already truncated to `qlen` bits with `bits2int`. Candidates are NOT
/// range-checked: a candidate may be zero or exceed the group order, in
/// which case the caller should discard it and draw the next.
///
/// The sequence cannot be rewound. To replay it from the start, construct
/// a new generator from the same inputs.
///
/// ```
/// use deterministic_ecdsa::{Curve, NistP256, NonceGenerator};
/// use sha2::{Digest, Sha256};
///
/// let seckey = base16ct::mixed::decode_vec(
///     "C9AFA9D845BA75166B5C215767B1D6934E50C3DB36E89B127B8A622B120F6721"
/// ).unwrap();
/// let x = NistP256::scalar_from_repr(seckey.as_slice().into()).unwrap();
///
/// let digest = Sha256::digest(b"sample");
/// let mut nonces = NonceGenerator::<NistP256, Sha256>::new(&x, &digest);
///
/// assert_eq!(
///     base16ct::upper::encode_string(&nonces.next()),
///     "A6E3C57DD01ABE90086538398355DD4C3B17AA873382B0F24D6129493D8AAD60"
/// );
/// ```
pub struct NonceGenerator<C, D>
where
    C: Curve,
    D: Digest + BlockSizeUser,
{
    state: DrbgState<D>,
    curve: PhantomData<C>,
}

impl<C, D> NonceGenerator<C, D>
where
    C: Curve,
    D: Digest + BlockSizeUser,
{
    /// Seeds a new generator from the secret scalar `x` and the message
    /// digest `h1`. The digest should be the output of the same hash
    /// function `D`, and may be of any length.
    pub fn new(x: &C::Scalar, h1: &[u8]) -> Self {
        let mut x_octets = int2octets::<C>(x);
        let h1_octets = bits2octets::<C>(h1);
        let state = DrbgState::seed(x_octets.as_ref(), h1_octets.as_ref());
        x_octets.as_mut().zeroize();
        NonceGenerator {
            state,
            curve: PhantomData,
        }
    }

    /// Returns the next nonce candidate, encoded as `rlen / 8` big-endian
    /// bytes, and advances the generator.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> C::Repr {
        let mut t = self.state.generate(C::ORDER_BITS);
        let candidate = bits2int::<C>(&t);
        t.as_mut_slice().zeroize();
        self.state.reseed();
        candidate
    }
}

/// Derives the RFC6979 nonce `k` for a given secret scalar and message
/// digest: the first candidate from the [`NonceGenerator`] which lies in
/// the range `[1, q-1]`.
///
/// Note that [`sign`][crate::sign] may skip further candidates if the
/// first valid nonce produces a zero `r` or `s`, so this is the nonce
/// used for signing in all but astronomically rare cases.
pub fn derive_nonce<C, D>(x: &C::Scalar, h1: &[u8]) -> Result<C::Scalar, SigningError>
where
    C: Curve,
    D: Digest + BlockSizeUser,
{
    let mut nonces = NonceGenerator::<C, D>::new(x, h1);
    for _ in 0..MAX_NONCE_ATTEMPTS {
        match C::scalar_from_repr(&nonces.next()) {
            Some(k) if !C::is_zero(&k) => return Ok(k),
            _ => continue,
        }
    }
    Err(SigningError::NonceExhausted)
}
