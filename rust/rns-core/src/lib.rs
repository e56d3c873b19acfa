//! Residue number system (RNS) arithmetic engine.
//!
//! Represents integers modulo `M = m_0 * ... * m_{k-1}` as vectors of
//! residues under pairwise coprime moduli, performs `+ - * /` component-wise
//! and recovers integers with the Chinese Remainder Theorem. All values are
//! arbitrary precision, so neither `M` nor intermediate CRT terms can
//! overflow. Every operation is a pure function of its arguments.
//!
//! ```
//! use num_bigint::{BigInt, BigUint};
//! use rns_core::{ModulusSet, Operation};
//!
//! let set = ModulusSet::from_u64s(&[3, 5, 7]).unwrap();
//! let a = set.encode(&BigInt::from(37)).unwrap();
//! let b = set.encode(&BigInt::from(50)).unwrap();
//! let sum = set.apply(&a, &b, Operation::Add).unwrap();
//! assert_eq!(set.decode(&sum).unwrap(), BigUint::from(87u32));
//! ```

pub mod arithmetic;
pub mod batch;
pub mod error;
pub mod euclid;
pub mod inverse;
pub mod modulus_set;
pub mod reconstruct;
pub mod residue;

pub use arithmetic::{apply, Operation, ParseOperationError};
pub use batch::{decode_all, encode_all};
pub use error::{Result, RnsError};
pub use euclid::{extended_gcd, BezoutTriple};
pub use inverse::mod_inverse;
pub use modulus_set::{check_pairwise_coprime, ModulusSet};
pub use reconstruct::{modulus_product, reconstruct};
pub use residue::{to_residues, ResidueVector};

use serde::Serializer;
use std::fmt::Display;

/// Serialize a big integer as its decimal string.
pub(crate) fn serde_decimal<T: Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Serialize a residue list as decimal strings.
pub(crate) fn serde_decimal_seq<S: Serializer>(
    values: &[num_bigint::BigUint],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|v| v.to_string()))
}
