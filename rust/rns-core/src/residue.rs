//! Integer to residue-vector conversion.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::Serialize;

use crate::error::{Result, RnsError};
use crate::inverse::canonical;

/// A residue vector, positionally aligned with the modulus set it was
/// produced under. Component `i` lies in `[0, m_i)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ResidueVector(#[serde(serialize_with = "crate::serde_decimal_seq")] Vec<BigUint>);

impl ResidueVector {
    pub(crate) fn from_canonical(components: Vec<BigUint>) -> Self {
        ResidueVector(components)
    }

    pub fn components(&self) -> &[BigUint] {
        &self.0
    }

    pub fn into_components(self) -> Vec<BigUint> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ResidueVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, r) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", r)?;
        }
        write!(f, "]")
    }
}

/// Compute the residue number system representation of `n`.
///
/// Returns (n mod m_0, ..., n mod m_{k-1}), each canonicalized into
/// [0, m_i) so negative inputs map to their positive representatives.
/// Fails with [`RnsError::InvalidModulus`] on a zero modulus.
pub fn to_residues(n: &BigInt, moduli: &[BigUint]) -> Result<Vec<BigUint>> {
    check_moduli(moduli)?;
    Ok(moduli.iter().map(|m| canonical(n, m)).collect())
}

/// Reject zero moduli, reporting the first offending index.
pub(crate) fn check_moduli(moduli: &[BigUint]) -> Result<()> {
    match moduli.iter().position(|m| m.is_zero()) {
        Some(index) => {
            log::warn!("rejecting zero modulus at index {}", index);
            Err(RnsError::InvalidModulus {
                index,
                modulus: moduli[index].clone(),
            })
        }
        None => Ok(()),
    }
}
