//! Extended Euclidean algorithm over arbitrary-precision integers.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use serde::Serialize;

/// Result of the extended Euclidean algorithm: `a*x + b*y = gcd`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BezoutTriple {
    /// Non-negative greatest common divisor of `a` and `b`.
    #[serde(serialize_with = "crate::serde_decimal")]
    pub gcd: BigInt,
    /// Coefficient of `a`.
    #[serde(serialize_with = "crate::serde_decimal")]
    pub x: BigInt,
    /// Coefficient of `b`.
    #[serde(serialize_with = "crate::serde_decimal")]
    pub y: BigInt,
}

impl BezoutTriple {
    /// Check the Bézout identity `a*x + b*y == gcd` for the inputs this
    /// triple was computed from.
    pub fn verify(&self, a: &BigInt, b: &BigInt) -> bool {
        a * &self.x + b * &self.y == self.gcd
    }
}

/// Extended GCD: returns (gcd, x, y) such that a*x + b*y = gcd(a, b).
///
/// Iterative form of the recursive definition `egcd(0, b) = (b, 0, 1)`,
/// `egcd(a, b) = (g, y1 - (b / a) * x1, x1)` where `(g, x1, y1) = egcd(b mod a, a)`.
/// Each step keeps `old_r = a*old_x + b*old_y`, so truncated division is fine
/// for negative operands; the sign is fixed at the end so `gcd >= 0`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> BezoutTriple {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = &old_r / &r;

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &q * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &q * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    if old_r.is_negative() {
        old_r = -old_r;
        old_x = -old_x;
        old_y = -old_y;
    }

    BezoutTriple {
        gcd: old_r,
        x: old_x,
        y: old_y,
    }
}
