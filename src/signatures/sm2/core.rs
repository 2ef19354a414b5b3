//! SM2 digital signatures (GB/T 32918.2-2016).
//!
//! Signing binds the signer's identity to the message through the
//! identity digest `Z`, then signs `e = SM3(Z ‖ M)`:
//!
//! ```text
//! k  ← [1, N − 1]
//! r  = (e + (k·G).x) mod N              resample if r = 0 or r + k = N
//! s  = (1 + d)⁻¹ · (k − r·d) mod N      resample if s = 0
//! ```
//!
//! Verification recomputes `e`, checks `r, s ∈ [1, N − 1]` and accepts iff
//! `(e + (s·G + (r + s)·P).x) mod N = r`.
//!
//! ## Notes
//!
//! - Signatures are the raw `r ‖ s` encoding, 64 bytes for SM2.
//! - Verification returns a plain `bool`; every rejection looks the same
//!   to the caller.
//! - Scalar multiplication is variable-time.

use std::fmt;
use std::sync::Arc;

use rand_core::{CryptoRng, RngCore};
use tracing::{debug, trace};

use super::curve::{AffinePoint, CurveParams};
use crate::encoding::{EncodingError, bytes_to_integer, field_to_bytes, integer_to_bytes};
use crate::hash::sm3::Sm3;
use crate::primitives::{U256, reduce_be_bytes};

/// Length of a raw `r ‖ s` signature.
pub const SIGNATURE_SIZE: usize = 64;

/// Identity used when the caller has none.
pub const DEFAULT_ID: &[u8] = b"1234567812345678";

/// Identities longer than this many bits cannot be encoded in `ENTL`.
const MAX_ID_BITS: usize = 0xffff;

/// Errors raised by SM2 key handling and signing.
#[derive(Debug, thiserror::Error)]
pub enum Sm2Error {
    /// The random source failed to produce bytes.
    #[error("random source failure: {0}")]
    RandomSource(#[from] rand_core::Error),

    /// The identity is longer than 65535 bits.
    #[error("identity too large: {bits} bits")]
    IdentityTooLarge { bits: usize },

    /// A value could not be given its canonical encoding.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Public key coordinates are not a point on the curve.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Private scalar outside `[1, N − 2]` or of the wrong length.
    #[error("invalid private key")]
    InvalidPrivateKey,
}

/// An SM2 public key.
#[derive(Clone, Copy)]
pub struct PublicKey {
    curve: &'static CurveParams,
    point: AffinePoint,
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKey")
            .field("curve", &self.curve.name)
            .field("point", &self.point)
            .finish()
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.point == other.point
    }
}

impl Eq for PublicKey {}

impl PublicKey {
    /// Wraps `point` after checking it lies on `curve`.
    ///
    /// # Errors
    /// [`Sm2Error::InvalidPublicKey`] if the point is off the curve or a
    /// coordinate is not a field element.
    pub fn from_affine(curve: &'static CurveParams, point: AffinePoint) -> Result<Self, Sm2Error> {
        if !curve.is_on_curve(&point) {
            return Err(Sm2Error::InvalidPublicKey);
        }

        Ok(Self { curve, point })
    }

    /// Parses the raw `X ‖ Y` encoding.
    ///
    /// # Errors
    /// [`Sm2Error::InvalidPublicKey`] on a wrong length or an invalid point.
    pub fn from_bytes(curve: &'static CurveParams, bytes: &[u8]) -> Result<Self, Sm2Error> {
        let width = curve.byte_len();
        if bytes.len() != 2 * width {
            return Err(Sm2Error::InvalidPublicKey);
        }

        let (x, y) = bytes.split_at(width);
        let point = AffinePoint {
            x: bytes_to_integer(x),
            y: bytes_to_integer(y),
        };

        Self::from_affine(curve, point)
    }

    /// Raw `X ‖ Y` encoding.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.point.x.to_be_bytes());
        out[32..].copy_from_slice(&self.point.y.to_be_bytes());
        out
    }

    /// Curve the key lives on.
    pub fn curve(&self) -> &'static CurveParams {
        self.curve
    }

    /// Affine coordinates of the key point.
    pub fn point(&self) -> &AffinePoint {
        &self.point
    }
}

/// An SM2 private key together with its public key.
///
/// The scalar is overwritten with zeros when the key is dropped. The wipe
/// is best-effort: `U256` is `Copy`, so register spills and stack copies
/// made while the key was in use are not tracked.
pub struct PrivateKey {
    d: U256,
    public: PublicKey,
}

/// Overwrites `value` with zeros.
fn wipe(value: &mut U256) {
    // Volatile so the wipe survives dead-store elimination.
    for byte in value.0.iter_mut() {
        unsafe { std::ptr::write_volatile(byte as *mut u8, 0u8) };
    }
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        wipe(&mut self.d);
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.public == other.public && self.d == other.d
    }
}

impl Eq for PrivateKey {}

impl PrivateKey {
    /// Builds a key from the scalar `d` and derives `d·G`.
    ///
    /// # Errors
    /// [`Sm2Error::InvalidPrivateKey`] unless `1 ≤ d ≤ N − 2`. The upper
    /// bound keeps `1 + d` invertible modulo `N`.
    pub fn from_scalar(curve: &'static CurveParams, d: U256) -> Result<Self, Sm2Error> {
        let max = curve.n - U256::from(2u8);
        if d.is_zero() || d > max {
            return Err(Sm2Error::InvalidPrivateKey);
        }

        let point = curve
            .scalar_base_mult(&d)
            .ok_or(Sm2Error::InvalidPrivateKey)?;

        Ok(Self {
            d,
            public: PublicKey { curve, point },
        })
    }

    /// Parses a 32-byte big-endian scalar.
    ///
    /// # Errors
    /// [`Sm2Error::InvalidPrivateKey`] on a wrong length or out-of-range
    /// scalar.
    pub fn from_bytes(curve: &'static CurveParams, bytes: &[u8]) -> Result<Self, Sm2Error> {
        if bytes.len() != curve.byte_len() {
            return Err(Sm2Error::InvalidPrivateKey);
        }

        Self::from_scalar(curve, bytes_to_integer(bytes))
    }

    /// Big-endian encoding of the scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.d.to_be_bytes()
    }

    /// Public half of the pair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

/// A raw `r ‖ s` signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    /// Wraps a 64-byte encoding, or returns `None` on any other length.
    ///
    /// No range check is done here; [`verify`] rejects out-of-range halves.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; SIGNATURE_SIZE] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Raw `r ‖ s` bytes.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.0
    }

    /// First half as an integer.
    pub fn r(&self) -> U256 {
        bytes_to_integer(&self.0[..32])
    }

    /// Second half as an integer.
    pub fn s(&self) -> U256 {
        bytes_to_integer(&self.0[32..])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Draws a scalar uniformly enough from `[1, bound]`.
///
/// Reads 40 bytes and reduces modulo `bound`, so the bias is below 2⁻⁶⁴.
fn random_scalar<R>(rng: &mut R, bound: &U256) -> Result<U256, Sm2Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let mut buf = [0u8; 32 + 8];
    rng.try_fill_bytes(&mut buf)?;

    let k = reduce_be_bytes(&buf, bound) + U256::ONE;
    buf.iter_mut().for_each(|b| *b = 0);

    Ok(k)
}

/// Generates a key pair on `curve`.
///
/// The scalar is uniform in `[1, N − 2]`.
///
/// # Errors
/// [`Sm2Error::RandomSource`] if `rng` fails.
pub fn generate_key<R>(curve: &'static CurveParams, rng: &mut R) -> Result<PrivateKey, Sm2Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    trace!(curve = curve.name, "generating key pair");

    let mut d = random_scalar(rng, &(curve.n - U256::from(2u8)))?;
    let key = PrivateKey::from_scalar(curve, d);
    wipe(&mut d);
    let key = key?;

    debug!(curve = curve.name, "key pair generated");
    Ok(key)
}

/// Computes `Z = SM3(ENTL ‖ ID ‖ a ‖ b ‖ Gx ‖ Gy ‖ X ‖ Y)`.
///
/// `ENTL` is the identity length in bits as a 2-byte big-endian integer.
///
/// # Errors
/// [`Sm2Error::IdentityTooLarge`] if `id` is longer than 8191 bytes.
pub fn identity_digest(public: &PublicKey, id: &[u8]) -> Result<[u8; 32], Sm2Error> {
    let bits = id.len().saturating_mul(8);
    if bits > MAX_ID_BITS {
        return Err(Sm2Error::IdentityTooLarge { bits });
    }

    let curve = public.curve;
    let mut hasher = Sm3::new();
    hasher.update(&(bits as u16).to_be_bytes());
    hasher.update(id);

    let mut buf = [0u8; 32];
    for value in [
        curve.a(),
        curve.b,
        curve.gx,
        curve.gy,
        public.point.x,
        public.point.y,
    ] {
        field_to_bytes(&value, &curve.p, &mut buf)?;
        hasher.update(&buf);
    }

    Ok(hasher.finalize())
}

/// `e = SM3(Z ‖ M)` as an integer.
fn message_representative(public: &PublicKey, id: &[u8], msg: &[u8]) -> Result<U256, Sm2Error> {
    let z = identity_digest(public, id)?;

    let mut hasher = Sm3::new();
    hasher.update(&z);
    hasher.update(msg);

    Ok(bytes_to_integer(&hasher.finalize()))
}

/// Signs `msg` under identity `id`.
///
/// # Errors
/// - [`Sm2Error::RandomSource`] if `rng` fails
/// - [`Sm2Error::IdentityTooLarge`] if `id` is too long
pub fn sign<R>(
    rng: &mut R,
    key: &PrivateKey,
    id: &[u8],
    msg: &[u8],
) -> Result<Signature, Sm2Error>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let curve = key.public.curve;
    let order = &curve.order;

    let e = order.reduce(&message_representative(&key.public, id, msg)?);
    let d1_inv = order.invert(&order.add(&key.d, &U256::ONE));
    let k_bound = curve.n - U256::ONE;

    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let mut k = random_scalar(rng, &k_bound)?;
        let halves = sign_with_nonce(curve, &e, &key.d, &d1_inv, &k);
        wipe(&mut k);

        let Some((r, s)) = halves else {
            trace!(attempt, "nonce rejected, resampling");
            continue;
        };

        if attempt > 1 {
            debug!(attempts = attempt, "signature accepted after resampling");
        }

        let mut out = [0u8; SIGNATURE_SIZE];
        let (r_bytes, s_bytes) = out.split_at_mut(curve.byte_len());
        integer_to_bytes(&r, r_bytes)?;
        integer_to_bytes(&s, s_bytes)?;

        return Ok(Signature(out));
    }
}

/// One signing attempt with nonce `k`, giving `(r, s)`.
///
/// `e` must already be reduced modulo `N` and `d1_inv` must be
/// `(1 + d)⁻¹ mod N`. Returns `None` when `k` has to be redrawn: `k·G` at
/// infinity, `r = 0`, `r + k = N` or `s = 0`.
fn sign_with_nonce(
    curve: &CurveParams,
    e: &U256,
    d: &U256,
    d1_inv: &U256,
    k: &U256,
) -> Option<(U256, U256)> {
    let order = &curve.order;
    let point = curve.scalar_base_mult(k)?;

    let r = order.add(e, &order.reduce(&point.x));
    if r.is_zero() {
        return None;
    }

    // Exact 257-bit comparison: a sum that wraps past 2²⁵⁶ never matches.
    let (r_plus_k, overflow) = r.overflowing_add(k);
    if !overflow && r_plus_k == curve.n {
        return None;
    }

    let s = order.mul(d1_inv, &order.sub(k, &order.mul(&r, d)));
    if s.is_zero() {
        return None;
    }

    Some((r, s))
}

/// Checks `signature` on `msg` under identity `id`.
///
/// Returns `false` for every failure: wrong length, `r` or `s` out of
/// range, an oversized identity, or a mismatching signature.
pub fn verify(public: &PublicKey, id: &[u8], msg: &[u8], signature: &[u8]) -> bool {
    let Some(signature) = Signature::from_bytes(signature) else {
        return false;
    };

    let curve = public.curve;
    let order = &curve.order;
    let (r, s) = (signature.r(), signature.s());

    if r.is_zero() || r >= curve.n || s.is_zero() || s >= curve.n {
        return false;
    }

    let Ok(e) = message_representative(public, id, msg) else {
        return false;
    };

    let t = order.add(&r, &s);
    if t.is_zero() {
        return false;
    }

    let Some(point) = curve.combined_mult(&s, &public.point, &t) else {
        return false;
    };

    order.add(&order.reduce(&e), &order.reduce(&point.x)) == r
}

/// A signing context binding an identity to a shared private key.
///
/// Several signers can share one key through the `Arc`.
#[derive(Clone, Debug)]
pub struct Signer {
    key: Arc<PrivateKey>,
    id: Vec<u8>,
}

impl Signer {
    pub fn new(key: Arc<PrivateKey>, id: impl Into<Vec<u8>>) -> Self {
        Self { key, id: id.into() }
    }

    /// Signer using [`DEFAULT_ID`].
    pub fn with_default_id(key: Arc<PrivateKey>) -> Self {
        Self::new(key, DEFAULT_ID)
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.key.public
    }

    /// Verifier for the same key and identity.
    pub fn verifier(&self) -> Verifier {
        Verifier::new(self.key.public, self.id.clone())
    }

    /// Signs `msg`; see [`sign`].
    pub fn sign<R>(&self, rng: &mut R, msg: &[u8]) -> Result<Signature, Sm2Error>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        sign(rng, &self.key, &self.id, msg)
    }
}

/// A verification context binding an identity to a public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verifier {
    public: PublicKey,
    id: Vec<u8>,
}

impl Verifier {
    pub fn new(public: PublicKey, id: impl Into<Vec<u8>>) -> Self {
        Self {
            public,
            id: id.into(),
        }
    }

    /// Verifier using [`DEFAULT_ID`].
    pub fn with_default_id(public: PublicKey) -> Self {
        Self::new(public, DEFAULT_ID)
    }

    pub fn id(&self) -> &[u8] {
        &self.id
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Checks `signature` on `msg`; see [`verify`].
    pub fn verify(&self, msg: &[u8], signature: &[u8]) -> bool {
        verify(&self.public, &self.id, msg, signature)
    }
}
