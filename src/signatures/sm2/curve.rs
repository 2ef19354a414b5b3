//! The SM2 elliptic curve (GB/T 32918.5-2017).
//!
//! `y² = x³ − 3x + b` over the 256-bit prime field `P`, with a generator of
//! prime order `N` and cofactor 1. The parameters are built once per
//! process and shared as a `&'static` handle; two handles compare equal
//! only if they are the same instance.

use std::sync::LazyLock;

use crate::primitives::{Modulus, U256};

use super::point::JacobianPoint;

const P: U256 =
    U256::from_be_hex("fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff");
const N: U256 =
    U256::from_be_hex("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123");
const B: U256 =
    U256::from_be_hex("28e9fa9e9d9f5e344d5a9e4bcf6509a7f39789f515ab8f92ddbcbd414d940e93");
const GX: U256 =
    U256::from_be_hex("32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7");
const GY: U256 =
    U256::from_be_hex("bc3736a2f4f6779c59bdcee36b692153d0a9877cc62a474002df32e52139f0a0");

static SM2: LazyLock<CurveParams> = LazyLock::new(CurveParams::sm2);

/// Returns the process-wide SM2 curve parameters.
pub fn curve() -> &'static CurveParams {
    &SM2
}

/// A point in affine coordinates.
///
/// The point at infinity has no affine form; operations that can produce
/// it return `Option<AffinePoint>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    pub x: U256,
    pub y: U256,
}

/// Domain parameters of a short Weierstrass curve with `a = P − 3`.
#[derive(Debug)]
pub struct CurveParams {
    /// Canonical curve name.
    pub name: &'static str,
    /// Field prime.
    pub p: U256,
    /// Order of the base point.
    pub n: U256,
    /// Curve coefficient `b`.
    pub b: U256,
    /// Base point x coordinate.
    pub gx: U256,
    /// Base point y coordinate.
    pub gy: U256,
    /// Field size in bits.
    pub bit_size: usize,

    pub(crate) field: Modulus,
    pub(crate) order: Modulus,
}

impl PartialEq for CurveParams {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
    }
}

impl Eq for CurveParams {}

impl CurveParams {
    fn sm2() -> Self {
        Self {
            name: "SM2",
            p: P,
            n: N,
            b: B,
            gx: GX,
            gy: GY,
            bit_size: 256,
            field: Modulus::new(P),
            order: Modulus::new(N),
        }
    }

    /// Curve coefficient `a = P − 3`.
    pub fn a(&self) -> U256 {
        self.p - U256::from(3u8)
    }

    /// Width in bytes of a canonical field element or scalar.
    pub fn byte_len(&self) -> usize {
        self.bit_size.div_ceil(8)
    }

    pub fn generator(&self) -> AffinePoint {
        AffinePoint {
            x: self.gx,
            y: self.gy,
        }
    }

    /// Returns `true` if `point` has coordinates in `[0, P)` and satisfies
    /// the curve equation.
    pub fn is_on_curve(&self, point: &AffinePoint) -> bool {
        if point.x >= self.p || point.y >= self.p {
            return false;
        }

        let fp = &self.field;
        let x3 = fp.mul(&fp.square(&point.x), &point.x);
        let three_x = fp.add(&fp.add(&point.x, &point.x), &point.x);
        let rhs = fp.add(&fp.sub(&x3, &three_x), &self.b);

        fp.square(&point.y) == rhs
    }

    /// `p1 + p2`, or `None` if the sum is the point at infinity.
    pub fn add(&self, p1: &AffinePoint, p2: &AffinePoint) -> Option<AffinePoint> {
        JacobianPoint::from_affine(p1)
            .add(&JacobianPoint::from_affine(p2), &self.field)
            .to_affine(&self.field)
    }

    /// `2 · point`, or `None` if the result is the point at infinity.
    pub fn double(&self, point: &AffinePoint) -> Option<AffinePoint> {
        JacobianPoint::from_affine(point)
            .double(&self.field)
            .to_affine(&self.field)
    }

    /// `k · point`, or `None` if the result is the point at infinity.
    pub fn scalar_mult(&self, point: &AffinePoint, k: &U256) -> Option<AffinePoint> {
        JacobianPoint::from_affine(point)
            .mul(k, &self.field)
            .to_affine(&self.field)
    }

    /// `k · G`, or `None` if the result is the point at infinity.
    pub fn scalar_base_mult(&self, k: &U256) -> Option<AffinePoint> {
        self.scalar_mult(&self.generator(), k)
    }

    /// `s · G + t · point`, converted to affine once.
    pub(crate) fn combined_mult(
        &self,
        s: &U256,
        point: &AffinePoint,
        t: &U256,
    ) -> Option<AffinePoint> {
        let sg = JacobianPoint::from_affine(&self.generator()).mul(s, &self.field);
        let tp = JacobianPoint::from_affine(point).mul(t, &self.field);

        sg.add(&tp, &self.field).to_affine(&self.field)
    }
}
