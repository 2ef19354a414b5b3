//! SM3 cryptographic hash function (GB/T 32905-2016).
//!
//! SM3 is a Merkle–Damgård hash with a 256-bit state, 512-bit message
//! blocks and a 256-bit digest. The compression function expands each
//! block into 68 words and runs 64 rounds over eight 32-bit registers.
//!
//! The crate exposes:
//! - [`Sm3`], a streaming hasher with exact state serialisation
//! - [`sm3`], a one-shot convenience function
//!
//! The `speed` feature switches the compression function to a fully
//! unrolled round sequence. Both variants produce identical output.

mod computations;
mod core;

pub use self::core::{HashStateError, MARSHALED_SIZE, Sm3, sm3};

/// Digest length in bytes.
pub const SIZE: usize = 32;

/// Message block length in bytes.
pub const BLOCK_SIZE: usize = 64;

/// Initial chaining value.
pub(crate) const IV: [u32; 8] = [
    0x7380_166f,
    0x4914_b2b9,
    0x1724_42d7,
    0xda8a_0600,
    0xa96f_30bc,
    0x1631_38aa,
    0xe38d_ee4d,
    0xb0fb_0e4e,
];

/// Round constant base for rounds 0..16.
pub(crate) const T0: u32 = 0x79cc_4519;

/// Round constant base for rounds 16..64.
pub(crate) const T1: u32 = 0x7a87_9d8a;
