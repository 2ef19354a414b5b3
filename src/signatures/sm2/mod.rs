//! SM2 elliptic-curve signatures.
//!
//! - `curve`: the fixed SM2 domain parameters and affine point operations
//! - `point`: Jacobian arithmetic backing the curve operations
//! - `core`: keys, identity digest, signing and verification
//!
//! Identity is not part of the key material. A [`Signer`] or [`Verifier`]
//! pairs a key with one identity, and any number of them may share the
//! same key pair.

mod core;
mod curve;
mod point;

pub use self::core::{
    DEFAULT_ID, PrivateKey, PublicKey, SIGNATURE_SIZE, Signature, Signer, Sm2Error, Verifier,
    generate_key, identity_digest, sign, verify,
};
pub use self::curve::{AffinePoint, CurveParams, curve};
