//! Carry-aware addition and subtraction for `U256`
//!
//! The operator traits use **wrapping** semantics (modulo 2²⁵⁶). The
//! `overflowing_*` methods additionally report the carry or borrow, which
//! the signature code relies on for exact comparisons against the group
//! order.

use crate::primitives::u256::U256;

use std::ops::{Add, Sub};

/// Computes `a + b + carry`, returning the low word and the carry out.
#[inline(always)]
pub(crate) fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = a as u128 + b as u128 + carry as u128;
    (t as u64, (t >> 64) as u64)
}

/// Computes `a - b - borrow`, returning the low word and the borrow out (0 or 1).
#[inline(always)]
pub(crate) fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let t = (a as u128).wrapping_sub(b as u128 + borrow as u128);
    (t as u64, ((t >> 64) as u64) & 1)
}

/// Computes `acc + a * b + carry`, returning the low word and the high word.
///
/// The result always fits in 128 bits.
#[inline(always)]
pub(crate) fn mac(acc: u64, a: u64, b: u64, carry: u64) -> (u64, u64) {
    let t = acc as u128 + (a as u128) * (b as u128) + carry as u128;
    (t as u64, (t >> 64) as u64)
}

pub(crate) fn add_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut out = [0u64; 4];
    let mut carry = 0;

    for i in 0..4 {
        (out[i], carry) = adc(a[i], b[i], carry);
    }

    (out, carry)
}

pub(crate) fn sub_limbs(a: &[u64; 4], b: &[u64; 4]) -> ([u64; 4], u64) {
    let mut out = [0u64; 4];
    let mut borrow = 0;

    for i in 0..4 {
        (out[i], borrow) = sbb(a[i], b[i], borrow);
    }

    (out, borrow)
}

impl U256 {
    /// Adds `rhs`, returning the wrapped sum and whether it overflowed.
    pub fn overflowing_add(&self, rhs: &U256) -> (U256, bool) {
        let (sum, carry) = add_limbs(&self.to_limbs(), &rhs.to_limbs());
        (U256::from_limbs(sum), carry != 0)
    }

    /// Subtracts `rhs`, returning the wrapped difference and whether it borrowed.
    pub fn overflowing_sub(&self, rhs: &U256) -> (U256, bool) {
        let (diff, borrow) = sub_limbs(&self.to_limbs(), &rhs.to_limbs());
        (U256::from_limbs(diff), borrow != 0)
    }
}

impl Add for U256 {
    type Output = U256;

    fn add(self, rhs: U256) -> Self::Output {
        self.overflowing_add(&rhs).0
    }
}

impl Sub for U256 {
    type Output = U256;

    fn sub(self, rhs: U256) -> Self::Output {
        self.overflowing_sub(&rhs).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_carries_across_limbs() {
        let a = U256::from(u64::MAX);
        let sum = a + U256::ONE;

        assert_eq!(sum, U256::from(1u128 << 64));
    }

    #[test]
    fn overflow_is_reported() {
        let (sum, overflow) = U256::MAX.overflowing_add(&U256::ONE);
        assert!(overflow);
        assert_eq!(sum, U256::ZERO);

        let (diff, borrow) = U256::ZERO.overflowing_sub(&U256::ONE);
        assert!(borrow);
        assert_eq!(diff, U256::MAX);
    }

    #[test]
    fn sub_is_inverse_of_add() {
        let a = U256::from_be_hex("fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff");
        let b = U256::from(0x1234_5678_9abc_def0u64);

        assert_eq!((a + b) - b, a);
    }
}
