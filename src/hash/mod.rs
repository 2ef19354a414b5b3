//! Hash algorithms exposed by the crate.
//!
//! Currently includes SM3 (GB/T 32905-2016) with a pure-Rust implementation.

pub mod sm3;

/// Re-export of the SM3 streaming hasher and one-shot convenience function.
pub use sm3::{Sm3, sm3};
