//! Error taxonomy for residue arithmetic.

use num_bigint::{BigInt, BigUint};

/// Errors returned by the residue number system engine.
///
/// Every variant carries the values that caused it, so a caller can report
/// exactly which modulus, component or operand was at fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RnsError {
    #[error("invalid modulus {modulus} at index {index}: moduli must be positive")]
    InvalidModulus { index: usize, modulus: BigUint },

    #[error("{operation}: modulus must be positive, got 0")]
    ZeroModulus { operation: &'static str },

    #[error("degenerate modulus 1 at index {index}: it carries no residue information")]
    DegenerateModulus { index: usize },

    #[error("modulus set is empty")]
    EmptyModulusSet,

    #[error(
        "moduli are not pairwise coprime: m[{first}] = {first_modulus} and \
         m[{second}] = {second_modulus} share gcd {gcd}"
    )]
    NonCoprimeModuli {
        first: usize,
        second: usize,
        first_modulus: BigUint,
        second_modulus: BigUint,
        gcd: BigUint,
    },

    #[error("{value} has no inverse modulo {modulus} (gcd = {gcd})")]
    NoInverse {
        value: BigInt,
        modulus: BigUint,
        gcd: BigInt,
    },

    #[error(
        "division undefined at component {index}: divisor {divisor} is not invertible \
         modulo {modulus}"
    )]
    DivisionUndefined {
        index: usize,
        divisor: BigUint,
        modulus: BigUint,
    },

    #[error("{operation}: vector has {found} components but the modulus set has {expected}")]
    VectorLengthMismatch {
        operation: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("residue {residue} at component {index} is outside [0, {modulus})")]
    ResidueOutOfRange {
        index: usize,
        residue: BigUint,
        modulus: BigUint,
    },
}

pub type Result<T> = std::result::Result<T, RnsError>;
