//! Parallel conversion of many values under one modulus set.
//!
//! Every conversion is a pure function of its inputs, so values are spread
//! across the rayon pool without coordination.

use num_bigint::{BigInt, BigUint};
use rayon::prelude::*;

use crate::error::Result;
use crate::modulus_set::ModulusSet;
use crate::residue::ResidueVector;

/// Encode every value. Returns the first error in input order.
pub fn encode_all(set: &ModulusSet, values: &[BigInt]) -> Result<Vec<ResidueVector>> {
    let results: Vec<Result<ResidueVector>> = values.par_iter().map(|n| set.encode(n)).collect();
    results.into_iter().collect()
}

/// Decode every vector. Returns the first error in input order.
pub fn decode_all(set: &ModulusSet, vectors: &[ResidueVector]) -> Result<Vec<BigUint>> {
    let results: Vec<Result<BigUint>> = vectors.par_iter().map(|v| set.decode(v)).collect();
    results.into_iter().collect()
}
