//! Modular arithmetic over 256-bit moduli
//!
//! A [`Modulus`] captures an odd modulus `m < 2²⁵⁶` together with the
//! constants needed for Montgomery multiplication:
//! - `inv = −m⁻¹ mod 2⁶⁴`
//! - `r2  = R² mod m` where `R = 2²⁵⁶`
//!
//! Values cross the API in canonical (non-Montgomery) form. Multiplication
//! performs two Montgomery products, `mont(mont(a, b), R²) = a·b mod m`, so
//! callers never see the Montgomery domain.
//!
//! This is variable-time code: exponentiation branches on exponent bits and
//! every product ends in a conditional subtraction.

use super::U256;
use super::u256::ops::{add_limbs, adc, mac, sub_limbs};

/// An odd modulus with precomputed Montgomery constants.
#[derive(Clone, Debug)]
pub struct Modulus {
    value: U256,
    limbs: [u64; 4],
    inv: u64,
    r2: [u64; 4],
}

const ONE_LIMBS: [u64; 4] = [1, 0, 0, 0];

impl Modulus {
    /// Builds the Montgomery context for `value`.
    ///
    /// # Panics
    /// Panics if `value` is even (Montgomery reduction needs an odd
    /// modulus) or smaller than 3.
    pub fn new(value: U256) -> Self {
        let limbs = value.to_limbs();
        assert!(limbs[0] & 1 == 1, "modulus must be odd");
        assert!(value > U256::from(2u8), "modulus must be at least 3");

        // Newton iteration doubles the number of correct low bits each step:
        // 1 → 2 → 4 → … → 64.
        let mut inv = 1u64;
        for _ in 0..6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(limbs[0].wrapping_mul(inv)));
        }

        let mut modulus = Self {
            value,
            limbs,
            inv: inv.wrapping_neg(),
            r2: [0; 4],
        };

        let mut r2 = ONE_LIMBS;
        for _ in 0..512 {
            r2 = modulus.add_limbs_mod(&r2, &r2);
        }
        modulus.r2 = r2;

        modulus
    }

    /// The modulus itself.
    pub fn value(&self) -> &U256 {
        &self.value
    }

    /// Reduces any 256-bit value into `[0, m)`.
    pub fn reduce(&self, x: &U256) -> U256 {
        // mont(x, R²) = x·R mod m is valid for unreduced x because the
        // intermediate stays below 2m; the second product strips the R.
        let x_r = self.mont_mul(&x.to_limbs(), &self.r2);
        U256::from_limbs(self.mont_mul(&x_r, &ONE_LIMBS))
    }

    /// `(a + b) mod m` for `a, b < m`.
    pub fn add(&self, a: &U256, b: &U256) -> U256 {
        U256::from_limbs(self.add_limbs_mod(&a.to_limbs(), &b.to_limbs()))
    }

    /// `(a − b) mod m` for `a, b < m`.
    pub fn sub(&self, a: &U256, b: &U256) -> U256 {
        let (diff, borrow) = sub_limbs(&a.to_limbs(), &b.to_limbs());

        if borrow == 0 {
            return U256::from_limbs(diff);
        }

        U256::from_limbs(add_limbs(&diff, &self.limbs).0)
    }

    /// `(−a) mod m` for `a < m`.
    pub fn neg(&self, a: &U256) -> U256 {
        self.sub(&U256::ZERO, a)
    }

    /// `(a · b) mod m` for `a, b < m`.
    pub fn mul(&self, a: &U256, b: &U256) -> U256 {
        let ab = self.mont_mul(&a.to_limbs(), &b.to_limbs());
        U256::from_limbs(self.mont_mul(&ab, &self.r2))
    }

    /// `a² mod m` for `a < m`.
    pub fn square(&self, a: &U256) -> U256 {
        self.mul(a, a)
    }

    /// `base^exp mod m` by left-to-right square-and-multiply.
    pub fn pow(&self, base: &U256, exp: &U256) -> U256 {
        let mut acc = self.reduce(&U256::ONE);

        for i in (0..exp.bits()).rev() {
            acc = self.square(&acc);

            if exp.bit(i) {
                acc = self.mul(&acc, base);
            }
        }

        acc
    }

    /// Multiplicative inverse by Fermat's little theorem.
    ///
    /// Only meaningful for a prime modulus. The inverse of zero is zero.
    pub fn invert(&self, a: &U256) -> U256 {
        let exp = self.value - U256::from(2u8);
        self.pow(a, &exp)
    }

    fn add_limbs_mod(&self, a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
        let (sum, carry) = add_limbs(a, b);
        let (reduced, borrow) = sub_limbs(&sum, &self.limbs);

        if carry != 0 || borrow == 0 { reduced } else { sum }
    }

    /// Montgomery product `a·b·R⁻¹ mod m` (CIOS, four 64-bit limbs).
    ///
    /// Requires `b < m`; `a` may be any 256-bit value.
    fn mont_mul(&self, a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
        let m = &self.limbs;
        let mut t = [0u64; 6];

        for &bi in b.iter() {
            let mut carry = 0;
            for j in 0..4 {
                (t[j], carry) = mac(t[j], a[j], bi, carry);
            }
            (t[4], t[5]) = adc(t[4], carry, 0);

            let q = t[0].wrapping_mul(self.inv);
            let (_, mut carry) = mac(t[0], q, m[0], 0);
            for j in 1..4 {
                (t[j - 1], carry) = mac(t[j], q, m[j], carry);
            }

            let (low, high) = adc(t[4], carry, 0);
            t[3] = low;
            t[4] = t[5] + high;
        }

        let result = [t[0], t[1], t[2], t[3]];
        let (reduced, borrow) = sub_limbs(&result, m);

        if t[4] != 0 || borrow == 0 { reduced } else { result }
    }
}

/// Reduces a big-endian byte string of any length modulo `modulus`.
///
/// Plain binary long division, so even moduli are accepted. Used where the
/// modulus is `n − 1` or `n − 2`, which Montgomery reduction cannot handle.
///
/// # Panics
/// Panics if `modulus` is zero.
pub fn reduce_be_bytes(bytes: &[u8], modulus: &U256) -> U256 {
    assert!(!modulus.is_zero(), "reduction modulo zero");

    let m = modulus.to_limbs();
    let mut rem = [0u64; 4];

    for &byte in bytes {
        for shift in (0..8).rev() {
            let top = rem[3] >> 63;

            rem[3] = (rem[3] << 1) | (rem[2] >> 63);
            rem[2] = (rem[2] << 1) | (rem[1] >> 63);
            rem[1] = (rem[1] << 1) | (rem[0] >> 63);
            rem[0] = (rem[0] << 1) | ((byte >> shift) & 1) as u64;

            // rem < m before the shift, so one subtraction restores it.
            let (reduced, borrow) = sub_limbs(&rem, &m);
            if top == 1 || borrow == 0 {
                rem = reduced;
            }
        }
    }

    U256::from_limbs(rem)
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: U256 =
        U256::from_be_hex("fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff");
    const N: U256 =
        U256::from_be_hex("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123");

    #[test]
    fn small_modulus_arithmetic() {
        let m = Modulus::new(U256::from(97u8));
        let a = U256::from(50u8);
        let b = U256::from(60u8);

        assert_eq!(m.add(&a, &b), U256::from(13u8));
        assert_eq!(m.sub(&a, &b), U256::from(87u8));
        assert_eq!(m.mul(&a, &b), U256::from((50u32 * 60 % 97) as u8));
        assert_eq!(m.neg(&a), U256::from(47u8));
        assert_eq!(m.reduce(&U256::from(1000u16)), U256::from((1000 % 97) as u8));
    }

    #[test]
    fn inverse_multiplies_to_one() {
        for modulus in [P, N] {
            let m = Modulus::new(modulus);
            let a = U256::from_be_hex(
                "3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8",
            );

            let inv = m.invert(&a);
            assert_eq!(m.mul(&a, &inv), U256::ONE);
        }
    }

    #[test]
    fn reduce_handles_values_above_modulus() {
        let m = Modulus::new(P);

        assert_eq!(m.reduce(&P), U256::ZERO);
        assert_eq!(m.reduce(&U256::MAX), U256::MAX - P);
        assert_eq!(m.reduce(&(P - U256::ONE)), P - U256::ONE);
    }

    #[test]
    fn mul_wraps_minus_one_squared() {
        let m = Modulus::new(N);
        let minus_one = N - U256::ONE;

        assert_eq!(m.mul(&minus_one, &minus_one), U256::ONE);
        assert_eq!(m.add(&minus_one, &U256::ONE), U256::ZERO);
    }

    #[test]
    fn fermat_holds() {
        let m = Modulus::new(P);
        let a = U256::from(0xdead_beefu32);

        assert_eq!(m.pow(&a, &(P - U256::ONE)), U256::ONE);
    }

    #[test]
    fn long_division_matches_small_values() {
        let m = U256::from(1000u16);
        assert_eq!(reduce_be_bytes(&[0x30, 0x39], &m), U256::from(345u16));
        assert_eq!(reduce_be_bytes(&[], &m), U256::ZERO);
    }

    #[test]
    fn long_division_of_wide_input_with_even_modulus() {
        let n_minus_1 = N - U256::ONE;
        let mut bytes = [0u8; 40];
        bytes[8..].copy_from_slice(&n_minus_1.to_be_bytes());

        assert_eq!(reduce_be_bytes(&bytes, &n_minus_1), U256::ZERO);

        // 2^256 mod (n - 1) == 2^256 - (n - 1), since n - 1 > 2^255.
        let mut two_256 = [0u8; 33];
        two_256[0] = 1;
        assert_eq!(
            reduce_be_bytes(&two_256, &n_minus_1),
            U256::ZERO - n_minus_1
        );
    }

    #[test]
    #[should_panic(expected = "modulus must be odd")]
    fn even_modulus_is_rejected() {
        Modulus::new(U256::from(96u8));
    }
}
