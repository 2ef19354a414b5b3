//! SM4 block cipher (GB/T 32907-2016).
//!
//! SM4 is a 128-bit block cipher with a 128-bit key, built as a 32-round
//! unbalanced Feistel network over four 32-bit words.
//!
//! The implementation is split into two layers:
//!
//! - `tables`: S-box, system parameters and the composite lookup tables
//! - `core`: key expansion and the block transform
//!
//! Only single-block encryption is provided. Modes of operation and
//! padding belong to the caller.

mod core;
mod tables;

pub use self::core::{CipherError, Sm4};

/// Block length in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Key length in bytes.
pub const KEY_SIZE: usize = 16;
