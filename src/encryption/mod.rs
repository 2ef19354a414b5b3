//! Block ciphers.
//!
//! Currently includes SM4. Only the raw single-block transform is
//! provided; chaining modes and padding are left to the caller.

pub mod sm4;

pub use sm4::Sm4;
