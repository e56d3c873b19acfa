//! Component-wise arithmetic over residue vectors.

use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RnsError};
use crate::inverse::mod_inverse;
use crate::residue::check_moduli;

/// Arithmetic operator applied component-wise to residue vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    pub const ALL: [Operation; 4] = [Operation::Add, Operation::Sub, Operation::Mul, Operation::Div];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Sub => "-",
            Operation::Mul => "*",
            Operation::Div => "/",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
        }
    }

    /// Evaluate the operator on plain integers. Division has no exact
    /// integer counterpart in a residue system and yields `None`.
    pub fn apply_plain(&self, a: &BigInt, b: &BigInt) -> Option<BigInt> {
        match self {
            Operation::Add => Some(a + b),
            Operation::Sub => Some(a - b),
            Operation::Mul => Some(a * b),
            Operation::Div => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Error for an unrecognized operator string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operation '{0}' (expected one of + - * / add sub mul div)")]
pub struct ParseOperationError(pub String);

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" => Ok(Operation::Add),
            "-" | "sub" | "subtract" => Ok(Operation::Sub),
            "*" | "mul" | "multiply" => Ok(Operation::Mul),
            "/" | "div" | "divide" => Ok(Operation::Div),
            _ => Err(ParseOperationError(s.to_string())),
        }
    }
}

/// Apply `op` component-wise to two residue vectors under `moduli`.
///
/// Both vectors must already be canonical under `moduli`. Division
/// multiplies by the inverse of each divisor component and aborts the whole
/// operation at the first non-invertible component.
pub fn apply(
    lhs: &[BigUint],
    rhs: &[BigUint],
    moduli: &[BigUint],
    op: Operation,
) -> Result<Vec<BigUint>> {
    for operand in [lhs, rhs] {
        if operand.len() != moduli.len() {
            return Err(RnsError::VectorLengthMismatch {
                operation: op.name(),
                expected: moduli.len(),
                found: operand.len(),
            });
        }
    }
    check_moduli(moduli)?;

    lhs.iter()
        .zip(rhs)
        .zip(moduli)
        .enumerate()
        .map(|(index, ((a, b), m))| apply_component(index, a, b, m, op))
        .collect()
}

fn apply_component(
    index: usize,
    a: &BigUint,
    b: &BigUint,
    m: &BigUint,
    op: Operation,
) -> Result<BigUint> {
    let r = match op {
        Operation::Add => (a + b) % m,
        // b % m < m, so the subtraction cannot underflow
        Operation::Sub => (a % m + m - b % m) % m,
        Operation::Mul => (a * b) % m,
        Operation::Div => {
            let divisor = BigInt::from_biguint(Sign::Plus, b.clone());
            let inv = mod_inverse(&divisor, m).map_err(|_| {
                log::debug!("division undefined at component {}: {} mod {}", index, b, m);
                RnsError::DivisionUndefined {
                    index,
                    divisor: b.clone(),
                    modulus: m.clone(),
                }
            })?;
            (a * inv) % m
        }
    };
    Ok(r)
}
