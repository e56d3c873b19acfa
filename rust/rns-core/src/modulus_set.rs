//! Validated modulus sets with a precomputed CRT basis.
//!
//! A [`ModulusSet`] is checked once at construction: every modulus must be at
//! least 2 and the moduli must be pairwise coprime. After that, encoding,
//! component-wise arithmetic and decoding all run against the same immutable
//! set. Vectors passed back in are checked against the set's length and
//! ranges, so a vector from a different set is rejected instead of decoding
//! to the wrong integer.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;

use crate::arithmetic::{self, Operation};
use crate::error::{Result, RnsError};
use crate::reconstruct::{combine, crt_basis, modulus_product};
use crate::residue::{check_moduli, to_residues, ResidueVector};

/// An ordered, pairwise coprime set of moduli `m_0..m_{k-1}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulusSet {
    moduli: Vec<BigUint>,
    /// M = product of all moduli.
    product: BigUint,
    /// c_i = M_i * (M_i^{-1} mod m_i) mod M.
    basis: Vec<BigUint>,
}

impl ModulusSet {
    /// Validate `moduli` and precompute the CRT basis.
    pub fn new(moduli: Vec<BigUint>) -> Result<Self> {
        if moduli.is_empty() {
            return Err(RnsError::EmptyModulusSet);
        }
        check_moduli(&moduli)?;
        if let Some(index) = moduli.iter().position(|m| m.is_one()) {
            return Err(RnsError::DegenerateModulus { index });
        }
        check_pairwise_coprime(&moduli)?;

        let product = modulus_product(&moduli);
        let basis = crt_basis(&moduli)?;
        log::debug!(
            "modulus set {:?}: M = {} ({} bits)",
            moduli.iter().map(|m| m.to_string()).collect::<Vec<_>>(),
            product,
            product.bits()
        );

        Ok(ModulusSet {
            moduli,
            product,
            basis,
        })
    }

    /// Convenience constructor for word-sized moduli.
    pub fn from_u64s(moduli: &[u64]) -> Result<Self> {
        Self::new(moduli.iter().map(|&m| BigUint::from(m)).collect())
    }

    pub fn moduli(&self) -> &[BigUint] {
        &self.moduli
    }

    /// Number of moduli `k`.
    pub fn len(&self) -> usize {
        self.moduli.len()
    }

    /// Always false: construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.moduli.is_empty()
    }

    /// M, the size of the represented range `[0, M)`.
    pub fn product(&self) -> &BigUint {
        &self.product
    }

    /// Residue vector of `n` under this set.
    pub fn encode(&self, n: &BigInt) -> Result<ResidueVector> {
        to_residues(n, &self.moduli).map(ResidueVector::from_canonical)
    }

    /// Wrap externally supplied components, checking length and range.
    pub fn vector(&self, components: Vec<BigUint>) -> Result<ResidueVector> {
        self.check_canonical("vector", &components)?;
        Ok(ResidueVector::from_canonical(components))
    }

    /// Component-wise `lhs op rhs`.
    pub fn apply(
        &self,
        lhs: &ResidueVector,
        rhs: &ResidueVector,
        op: Operation,
    ) -> Result<ResidueVector> {
        self.check_canonical(op.name(), lhs.components())?;
        self.check_canonical(op.name(), rhs.components())?;
        arithmetic::apply(lhs.components(), rhs.components(), &self.moduli, op)
            .map(ResidueVector::from_canonical)
    }

    /// The unique integer in `[0, M)` with the given residues.
    pub fn decode(&self, vector: &ResidueVector) -> Result<BigUint> {
        self.check_canonical("decode", vector.components())?;
        Ok(combine(vector.components(), &self.basis, &self.product))
    }

    fn check_len(&self, operation: &'static str, found: usize) -> Result<()> {
        if found != self.moduli.len() {
            return Err(RnsError::VectorLengthMismatch {
                operation,
                expected: self.moduli.len(),
                found,
            });
        }
        Ok(())
    }

    /// Length matches the set and every component lies in `[0, m_i)`.
    fn check_canonical(&self, operation: &'static str, components: &[BigUint]) -> Result<()> {
        self.check_len(operation, components.len())?;
        for (index, (r, m)) in components.iter().zip(&self.moduli).enumerate() {
            if r >= m {
                log::warn!("{}: residue {} at component {} is not below {}", operation, r, index, m);
                return Err(RnsError::ResidueOutOfRange {
                    index,
                    residue: r.clone(),
                    modulus: m.clone(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ModulusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, m) in self.moduli.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", m)?;
        }
        write!(f, ")")
    }
}

/// Check gcd(m_i, m_j) = 1 for all i < j, reporting the first failing pair.
pub fn check_pairwise_coprime(moduli: &[BigUint]) -> Result<()> {
    for (i, a) in moduli.iter().enumerate() {
        for (j, b) in moduli.iter().enumerate().skip(i + 1) {
            let g = a.gcd(b);
            if !g.is_one() {
                log::warn!("moduli m[{}] = {} and m[{}] = {} share factor {}", i, a, j, b, g);
                return Err(RnsError::NonCoprimeModuli {
                    first: i,
                    second: j,
                    first_modulus: a.clone(),
                    second_modulus: b.clone(),
                    gcd: g,
                });
            }
        }
    }
    Ok(())
}
