//! Jacobian point arithmetic on short Weierstrass curves with `a = −3`.
//!
//! A Jacobian point `(X, Y, Z)` stands for the affine point
//! `(X / Z², Y / Z³)`. The point at infinity is any triple with `Z = 0`.
//! Working projectively defers the field inversion to a single
//! [`to_affine`](JacobianPoint::to_affine) call at the end of a scalar
//! multiplication.

use crate::primitives::{Modulus, U256};

use super::curve::AffinePoint;

#[derive(Clone, Copy, Debug)]
pub(crate) struct JacobianPoint {
    x: U256,
    y: U256,
    z: U256,
}

impl JacobianPoint {
    pub(crate) const INFINITY: Self = Self {
        x: U256::ONE,
        y: U256::ONE,
        z: U256::ZERO,
    };

    pub(crate) fn from_affine(point: &AffinePoint) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: U256::ONE,
        }
    }

    pub(crate) fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Converts back to affine coordinates, or `None` for infinity.
    pub(crate) fn to_affine(&self, fp: &Modulus) -> Option<AffinePoint> {
        if self.is_infinity() {
            return None;
        }

        let z_inv = fp.invert(&self.z);
        let z_inv2 = fp.square(&z_inv);
        let z_inv3 = fp.mul(&z_inv2, &z_inv);

        Some(AffinePoint {
            x: fp.mul(&self.x, &z_inv2),
            y: fp.mul(&self.y, &z_inv3),
        })
    }

    /// Point doubling ("dbl-2001-b", valid for `a = −3`).
    pub(crate) fn double(&self, fp: &Modulus) -> Self {
        if self.is_infinity() {
            return *self;
        }

        let delta = fp.square(&self.z);
        let gamma = fp.square(&self.y);
        let beta = fp.mul(&self.x, &gamma);

        // alpha = 3 · (X − delta) · (X + delta)
        let t = fp.mul(&fp.sub(&self.x, &delta), &fp.add(&self.x, &delta));
        let alpha = fp.add(&fp.add(&t, &t), &t);

        let beta4 = times4(fp, &beta);
        let x3 = fp.sub(&fp.square(&alpha), &fp.add(&beta4, &beta4));

        let yz = fp.add(&self.y, &self.z);
        let z3 = fp.sub(&fp.sub(&fp.square(&yz), &gamma), &delta);

        let gamma2_8 = times8(fp, &fp.square(&gamma));
        let y3 = fp.sub(&fp.mul(&alpha, &fp.sub(&beta4, &x3)), &gamma2_8);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Point addition ("add-1998-cmo-2"), falling back to doubling when
    /// both inputs are the same point.
    pub(crate) fn add(&self, other: &Self, fp: &Modulus) -> Self {
        if self.is_infinity() {
            return *other;
        }
        if other.is_infinity() {
            return *self;
        }

        let z1z1 = fp.square(&self.z);
        let z2z2 = fp.square(&other.z);

        let u1 = fp.mul(&self.x, &z2z2);
        let u2 = fp.mul(&other.x, &z1z1);
        let s1 = fp.mul(&fp.mul(&self.y, &other.z), &z2z2);
        let s2 = fp.mul(&fp.mul(&other.y, &self.z), &z1z1);

        let h = fp.sub(&u2, &u1);
        let r = fp.sub(&s2, &s1);

        if h.is_zero() {
            if r.is_zero() {
                return self.double(fp);
            }
            return Self::INFINITY;
        }

        let hh = fp.square(&h);
        let hhh = fp.mul(&h, &hh);
        let v = fp.mul(&u1, &hh);

        let x3 = fp.sub(&fp.sub(&fp.square(&r), &hhh), &fp.add(&v, &v));
        let y3 = fp.sub(&fp.mul(&r, &fp.sub(&v, &x3)), &fp.mul(&s1, &hhh));
        let z3 = fp.mul(&fp.mul(&self.z, &other.z), &h);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Left-to-right double-and-add.
    ///
    /// Variable-time in the bits of `k`.
    pub(crate) fn mul(&self, k: &U256, fp: &Modulus) -> Self {
        let mut acc = Self::INFINITY;

        for i in (0..k.bits()).rev() {
            acc = acc.double(fp);

            if k.bit(i) {
                acc = acc.add(self, fp);
            }
        }

        acc
    }
}

fn times4(fp: &Modulus, x: &U256) -> U256 {
    let x2 = fp.add(x, x);
    fp.add(&x2, &x2)
}

fn times8(fp: &Modulus, x: &U256) -> U256 {
    let x4 = times4(fp, x);
    fp.add(&x4, &x4)
}
