//! Chinese national cryptographic standards in pure Rust
//!
//! This crate implements the three commercial cryptography algorithms
//! published by the Chinese State Cryptography Administration:
//!
//! - **SM2** (GB/T 32918), identity-bound elliptic-curve signatures over a
//!   dedicated 256-bit prime curve
//! - **SM3** (GB/T 32905), a 256-bit Merkle–Damgård hash
//! - **SM4** (GB/T 32907), a 128-bit block cipher
//!
//! The focus is on **clarity and bit-exact interoperability** with the
//! published test vectors rather than on a large high-level API.
//!
//! # Module overview
//!
//! - `primitives`  
//!   Fixed-size 256-bit integers and Montgomery modular arithmetic. These
//!   back every field element and scalar used by the signature code.
//!
//! - `encoding`  
//!   Fixed-width big-endian integer encodings with field range checks.
//!
//! - `hash`  
//!   SM3, with a streaming hasher and exact state serialisation.
//!
//! - `encryption`  
//!   SM4 single-block encryption. Modes of operation are out of scope.
//!
//! - `signatures`  
//!   SM2 key generation, signing and verification, including the
//!   identity digest `Z` and identity-scoped signing contexts.
//!
//! # Design goals
//!
//! - No heap allocations in core primitives
//! - Minimal and explicit APIs
//! - Closed error enums per component
//!
//! Arithmetic is **not** constant-time. The crate matches published
//! vectors and is suitable for interoperability work, not for hostile
//! side-channel environments.

pub mod encoding;
pub mod encryption;
pub mod hash;
pub mod primitives;
pub mod signatures;
