//! Modular multiplicative inverse.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::error::{Result, RnsError};
use crate::euclid::extended_gcd;

/// Modular inverse: a^{-1} mod m, canonicalized into [0, m).
///
/// Fails with [`RnsError::NoInverse`] when gcd(a, m) != 1, which is an
/// ordinary outcome for non-coprime inputs. A zero modulus is rejected as
/// [`RnsError::ZeroModulus`]. Runs in O(log min(a, m)) steps.
pub fn mod_inverse(a: &BigInt, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(RnsError::ZeroModulus {
            operation: "mod_inverse",
        });
    }

    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    let bezout = extended_gcd(a, &m_int);
    if !bezout.gcd.is_one() {
        log::debug!("mod_inverse: {} has no inverse modulo {} (gcd = {})", a, m, bezout.gcd);
        return Err(RnsError::NoInverse {
            value: a.clone(),
            modulus: m.clone(),
            gcd: bezout.gcd,
        });
    }

    Ok(canonical(&bezout.x, m))
}

/// Canonical representative of `x` in [0, m). `m` must be non-zero.
pub(crate) fn canonical(x: &BigInt, m: &BigUint) -> BigUint {
    let m_int = BigInt::from_biguint(Sign::Plus, m.clone());
    // mod_floor with a positive modulus is never negative
    x.mod_floor(&m_int).magnitude().clone()
}
