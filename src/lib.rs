#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

mod bits;
mod curve;
mod nist;
mod nonces;
mod signature;
mod signing;

#[cfg(any(feature = "secp256k1", feature = "k256"))]
mod secp256k1;

pub mod errors;

pub use bits::*;
pub use curve::Curve;
pub use nist::*;
pub use nonces::*;
pub use signature::*;
pub use signing::*;

#[cfg(any(feature = "secp256k1", feature = "k256"))]
pub use secp256k1::Secp256k1;

#[cfg(test)]
pub(crate) mod testhex;

/// Re-export of the inner types used to represent secp256k1 points and scalars.
#[cfg(any(feature = "secp256k1", feature = "k256"))]
pub use secp;

/// Re-export of the RustCrypto curve traits, so that other
/// curves can be plugged in without a direct dependency.
pub use elliptic_curve;
