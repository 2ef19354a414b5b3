//! Primitive types
//!
//! Fixed-size integers and the modular arithmetic built on them. These are
//! the arithmetic collaborators of the signature scheme: every field
//! element, scalar and coordinate is a [`U256`], and every reduction goes
//! through a [`Modulus`] or [`reduce_be_bytes`].
//!
//! They are intentionally minimal and do not attempt to replicate a
//! full-featured big-integer library.

mod modular;
mod u256;

pub use modular::{Modulus, reduce_be_bytes};
pub use u256::U256;
