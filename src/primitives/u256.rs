//! 256-bit unsigned integer primitive
//!
//! This module defines a fixed-size 256-bit unsigned integer type (`U256`)
//! used for every field element, scalar and curve coordinate in the crate.
//!
//! It is designed as a **simple, explicit value type**, not as a full
//! big-integer arithmetic library. Modular arithmetic lives in
//! [`Modulus`](crate::primitives::Modulus); this type only provides
//! storage, comparison, bit access and carry-aware addition/subtraction.
//!
//! The internal representation is big-endian, which aligns naturally with
//! the fixed-width byte encodings used on the wire.

mod conv;
pub(crate) mod ops;

use std::fmt::{Display, Formatter, LowerHex, Result};

/// Fixed-size 256-bit unsigned integer.
///
/// The value is stored as 32 bytes in **big-endian** order, so the derived
/// ordering is the numeric ordering.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U256(pub(crate) [u8; 32]);

impl U256 {
    /// The value zero.
    pub const ZERO: Self = Self([0u8; 32]);

    /// The value one.
    pub const ONE: Self = Self::one_be();

    /// The maximum representable value (2²⁵⁶ − 1).
    pub const MAX: Self = Self([255u8; 32]);

    /// Returns the value one encoded in big-endian form.
    pub const fn one_be() -> Self {
        let mut out = [0u8; 32];
        out[31] = 1;
        U256(out)
    }

    /// Creates a value from its 32-byte big-endian encoding.
    pub const fn from_be_bytes(bytes: [u8; 32]) -> Self {
        U256(bytes)
    }

    /// Parses exactly 64 hexadecimal digits (big-endian).
    ///
    /// Intended for constants; invalid input panics, which in a `const`
    /// context is a compile error.
    pub const fn from_be_hex(hex: &str) -> Self {
        let digits = hex.as_bytes();
        assert!(digits.len() == 64, "U256::from_be_hex expects 64 digits");

        let mut out = [0u8; 32];
        let mut i = 0;
        while i < 32 {
            out[i] = (hex_nibble(digits[2 * i]) << 4) | hex_nibble(digits[2 * i + 1]);
            i += 1;
        }

        U256(out)
    }

    /// Returns the 32-byte big-endian encoding.
    pub const fn to_be_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` if the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    /// Counts the number of leading zero bits in the integer.
    ///
    /// # Returns
    /// The number of leading zero bits in the range `0..=256`.
    pub fn leading_zeros(&self) -> u32 {
        let mut count = 0u32;

        for &byte in self.0.iter() {
            if byte == 0 {
                count += 8;
            } else {
                count += byte.leading_zeros();
                return count;
            }
        }

        count
    }

    /// Minimal number of bits needed to represent the value (0 for zero).
    pub fn bits(&self) -> usize {
        256 - self.leading_zeros() as usize
    }

    /// Returns bit `index`, counting from the least significant bit.
    pub fn bit(&self, index: usize) -> bool {
        if index >= 256 {
            return false;
        }

        (self.0[31 - index / 8] >> (index % 8)) & 1 == 1
    }

    /// Little-endian 64-bit limbs, the layout used by modular arithmetic.
    pub(crate) fn to_limbs(self) -> [u64; 4] {
        let mut out = [0u64; 4];

        for (limb, chunk) in out.iter_mut().zip(self.0.rchunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_be_bytes(word);
        }

        out
    }

    pub(crate) fn from_limbs(limbs: [u64; 4]) -> Self {
        let mut out = [0u8; 32];

        for (chunk, limb) in out.rchunks_exact_mut(8).zip(limbs) {
            chunk.copy_from_slice(&limb.to_be_bytes());
        }

        U256(out)
    }
}

const fn hex_nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => panic!("invalid hex digit"),
    }
}

impl Display for U256 {
    /// Formats the value as a colon-separated hexadecimal string.
    ///
    /// Example:
    /// `00:1F:A4:...`
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }

            write!(f, "{:02X}", byte)?;
        }

        Ok(())
    }
}

impl LowerHex for U256 {
    /// Formats the value as 64 lowercase hex digits.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limbs_are_little_endian() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x01;
        bytes[0] = 0x80;
        let v = U256::from_be_bytes(bytes);

        let limbs = v.to_limbs();
        assert_eq!(limbs[0], 1);
        assert_eq!(limbs[3], 0x8000_0000_0000_0000);
        assert_eq!(U256::from_limbs(limbs), v);
    }

    #[test]
    fn bit_access_and_length() {
        let v = U256::from(0b1010u8);
        assert!(v.bit(1));
        assert!(!v.bit(0));
        assert!(v.bit(3));
        assert_eq!(v.bits(), 4);
        assert_eq!(U256::ZERO.bits(), 0);
        assert_eq!(U256::MAX.bits(), 256);
        assert!(U256::MAX.bit(255));
        assert!(!U256::MAX.bit(256));
    }

    #[test]
    fn hex_constant_parsing() {
        const V: U256 =
            U256::from_be_hex("00000000000000000000000000000000000000000000000000000000000000ff");
        assert_eq!(V, U256::from(0xffu8));
        assert_eq!(
            format!("{:x}", V),
            "00000000000000000000000000000000000000000000000000000000000000ff"
        );
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(U256::ONE < U256::from(2u8));
        assert!(U256::from(0x0100u16) > U256::from(0xffu8));
        assert!(U256::MAX > U256::ZERO);
    }
}
