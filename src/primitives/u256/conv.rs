//! Conversions between `U256`, byte arrays and native integers.
//!
//! All conversions preserve the big-endian representation and never
//! truncate: native integers are widened into the least significant bytes.

use crate::primitives::U256;

impl From<U256> for [u8; 32] {
    fn from(value: U256) -> Self {
        value.0
    }
}

impl From<[u8; 32]> for U256 {
    fn from(value: [u8; 32]) -> Self {
        U256(value)
    }
}

macro_rules! from_native {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for U256 {
                fn from(value: $ty) -> Self {
                    let bytes = value.to_be_bytes();
                    let mut out = [0u8; 32];
                    out[32 - bytes.len()..].copy_from_slice(&bytes);
                    U256(out)
                }
            }
        )*
    };
}

from_native!(u8, u16, u32, u64, u128);

/// Borrows the underlying 32-byte big-endian array.
impl AsRef<[u8]> for U256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
