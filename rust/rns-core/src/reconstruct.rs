//! Chinese Remainder Theorem reconstruction.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use crate::error::{Result, RnsError};
use crate::inverse::mod_inverse;
use crate::residue::check_moduli;

/// Reconstruct a number from its CRT residues and moduli.
///
/// Given residues[i] = N mod moduli[i] for pairwise coprime moduli,
/// returns N mod M where M is the product of all moduli. Every term is
/// reduced mod M as it is accumulated.
///
/// If the moduli are not pairwise coprime some `M_i` shares a factor with
/// `m_i`, and the call fails with [`RnsError::NoInverse`] instead of
/// returning a non-unique answer.
pub fn reconstruct(residues: &[BigUint], moduli: &[BigUint]) -> Result<BigUint> {
    if residues.len() != moduli.len() {
        return Err(RnsError::VectorLengthMismatch {
            operation: "reconstruct",
            expected: moduli.len(),
            found: residues.len(),
        });
    }
    check_moduli(moduli)?;

    let basis = crt_basis(moduli)?;
    let product = modulus_product(moduli);
    Ok(combine(residues, &basis, &product))
}

/// Product of all moduli. The empty product is 1.
pub fn modulus_product(moduli: &[BigUint]) -> BigUint {
    moduli.iter().fold(BigUint::one(), |acc, m| acc * m)
}

/// CRT basis coefficients `c_i = M_i * (M_i^{-1} mod m_i) mod M`, so that
/// `N = sum(r_i * c_i) mod M`.
pub(crate) fn crt_basis(moduli: &[BigUint]) -> Result<Vec<BigUint>> {
    let product = modulus_product(moduli);
    moduli
        .iter()
        .map(|m| -> Result<BigUint> {
            let partial = &product / m; // product of all moduli except m
            let reduced = BigInt::from_biguint(Sign::Plus, &partial % m);
            let y = mod_inverse(&reduced, m)?;
            Ok(partial * y % &product)
        })
        .collect()
}

/// Accumulate `sum(r_i * c_i) mod M` over a precomputed basis.
pub(crate) fn combine(residues: &[BigUint], basis: &[BigUint], product: &BigUint) -> BigUint {
    residues
        .iter()
        .zip(basis)
        .fold(BigUint::zero(), |acc, (r, c)| (acc + r * c % product) % product)
}
