//! Integration tests for the residue number system engine.

use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rns_core::{
    apply, extended_gcd, mod_inverse, reconstruct, to_residues, ModulusSet, Operation, RnsError,
};

const SMALL_PRIMES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

fn big_moduli(ms: &[u64]) -> Vec<BigUint> {
    ms.iter().map(|&m| BigUint::from(m)).collect()
}

/// Pick a random pairwise coprime set by sampling distinct small primes.
fn random_prime_moduli(rng: &mut StdRng) -> Vec<BigUint> {
    let k = rng.gen_range(1..=6);
    let mut chosen: Vec<u64> = Vec::new();
    while chosen.len() < k {
        let p = SMALL_PRIMES[rng.gen_range(0..SMALL_PRIMES.len())];
        if !chosen.contains(&p) {
            chosen.push(p);
        }
    }
    big_moduli(&chosen)
}

fn product(moduli: &[BigUint]) -> BigUint {
    moduli.iter().fold(BigUint::one(), |acc, m| acc * m)
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn test_scenario_residues_of_37() {
    let moduli = big_moduli(&[3, 5, 7]);
    let r = to_residues(&BigInt::from(37), &moduli).unwrap();
    assert_eq!(r, big_moduli(&[1, 2, 2]));
    assert_eq!(reconstruct(&r, &moduli).unwrap(), BigUint::from(37u32));
}

#[test]
fn test_scenario_add_37_50() {
    let moduli = big_moduli(&[3, 5, 7]);
    let a = to_residues(&BigInt::from(37), &moduli).unwrap();
    let b = to_residues(&BigInt::from(50), &moduli).unwrap();
    let sum = apply(&a, &b, &moduli, Operation::Add).unwrap();
    assert_eq!(reconstruct(&sum, &moduli).unwrap(), BigUint::from(87u32));
}

#[test]
fn test_scenario_divide_mod_5() {
    let moduli = big_moduli(&[5]);
    assert_eq!(
        mod_inverse(&BigInt::from(3), &BigUint::from(5u32)).unwrap(),
        BigUint::from(2u32)
    );
    let a = to_residues(&BigInt::from(4), &moduli).unwrap();
    let b = to_residues(&BigInt::from(3), &moduli).unwrap();
    let q = apply(&a, &b, &moduli, Operation::Div).unwrap();
    assert_eq!(q, big_moduli(&[3]));
}

#[test]
fn test_scenario_inverse_4_mod_8_fails() {
    let err = mod_inverse(&BigInt::from(4), &BigUint::from(8u32)).unwrap_err();
    assert!(matches!(err, RnsError::NoInverse { .. }));
    assert_eq!(err.to_string(), "4 has no inverse modulo 8 (gcd = 4)");
}

#[test]
fn test_scenario_non_coprime_moduli() {
    // Rejected up front by the validated set...
    assert!(matches!(
        ModulusSet::from_u64s(&[4, 6]),
        Err(RnsError::NonCoprimeModuli { .. })
    ));
    // ...and never answered silently by the free function.
    let moduli = big_moduli(&[4, 6]);
    for n in 0..24 {
        let r = to_residues(&BigInt::from(n), &moduli).unwrap();
        assert!(reconstruct(&r, &moduli).is_err());
    }
}

// ============================================================
// Properties
// ============================================================

#[test]
fn test_round_trip_property() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let moduli = random_prime_moduli(&mut rng);
        let m = product(&moduli);
        let n = rng.gen_biguint_below(&m);
        let r = to_residues(&BigInt::from(n.clone()), &moduli).unwrap();
        assert_eq!(reconstruct(&r, &moduli).unwrap(), n, "moduli {:?}", moduli);
    }
}

#[test]
fn test_homomorphism_property() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let moduli = random_prime_moduli(&mut rng);
        let m = BigInt::from(product(&moduli));
        let a = BigInt::from(rng.gen_range(-100_000i64..100_000));
        let b = BigInt::from(rng.gen_range(-100_000i64..100_000));
        let ra = to_residues(&a, &moduli).unwrap();
        let rb = to_residues(&b, &moduli).unwrap();

        for op in [Operation::Add, Operation::Sub, Operation::Mul] {
            let r = apply(&ra, &rb, &moduli, op).unwrap();
            let got = reconstruct(&r, &moduli).unwrap();
            let expected = op.apply_plain(&a, &b).unwrap().mod_floor(&m);
            assert_eq!(BigInt::from(got), expected, "{} {} {} under {:?}", a, op, b, moduli);
        }
    }
}

#[test]
fn test_division_inverts_multiplication() {
    let mut rng = StdRng::seed_from_u64(7);
    let set = ModulusSet::from_u64s(&[101, 103, 107, 109]).unwrap();
    for _ in 0..100 {
        let a = BigInt::from(rng.gen_range(0u64..1_000_000));
        // Divisor coprime to every modulus so each component is invertible
        let b = loop {
            let b = rng.gen_range(1u64..1_000_000);
            if [101, 103, 107, 109].iter().all(|m| b % m != 0) {
                break BigInt::from(b);
            }
        };
        let va = set.encode(&a).unwrap();
        let vb = set.encode(&b).unwrap();
        let q = set.apply(&va, &vb, Operation::Div).unwrap();
        let back = set.apply(&q, &vb, Operation::Mul).unwrap();
        assert_eq!(back, va);
    }
}

#[test]
fn test_inverse_correctness_and_failure() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..500 {
        let m = rng.gen_range(2u64..10_000);
        let a = rng.gen_range(-20_000i64..20_000);
        let big_a = BigInt::from(a);
        let big_m = BigUint::from(m);
        let coprime = big_a.abs().gcd(&BigInt::from(m)).is_one();
        match mod_inverse(&big_a, &big_m) {
            Ok(x) => {
                assert!(coprime, "inverse of {} mod {} should not exist", a, m);
                assert!(x < big_m);
                assert_eq!((&big_a * BigInt::from(x)).mod_floor(&BigInt::from(m)), BigInt::one());
            }
            Err(RnsError::NoInverse { gcd, .. }) => {
                assert!(!coprime, "inverse of {} mod {} should exist", a, m);
                assert!(gcd > BigInt::one());
            }
            Err(other) => panic!("unexpected error {:?}", other),
        }
    }
}

#[test]
fn test_bezout_identity_property() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..500 {
        let a = rng.gen_bigint(96);
        let b = rng.gen_bigint(80);
        let t = extended_gcd(&a, &b);
        assert!(t.verify(&a, &b), "Bezout identity for ({}, {})", a, b);
        assert_eq!(t.gcd, a.abs().gcd(&b.abs()));
        assert!(!t.gcd.is_negative());
    }
}

#[test]
fn test_wide_moduli_no_overflow() {
    // The eight largest primes below 2^61; M is close to 2^488
    let primes: [u64; 8] = [
        2_305_843_009_213_693_951, // 2^61 - 1
        2_305_843_009_213_693_921,
        2_305_843_009_213_693_907,
        2_305_843_009_213_693_723,
        2_305_843_009_213_693_693,
        2_305_843_009_213_693_669,
        2_305_843_009_213_693_613,
        2_305_843_009_213_693_561,
    ];
    let set = ModulusSet::from_u64s(&primes).unwrap();
    assert!(set.product().bits() > 480);
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..20 {
        let n = rng.gen_biguint_below(set.product());
        let v = set.encode(&BigInt::from(n.clone())).unwrap();
        assert_eq!(set.decode(&v).unwrap(), n);
        assert_eq!(reconstruct(v.components(), set.moduli()).unwrap(), n);
    }
}

#[test]
fn test_zero_and_max_values() {
    let set = ModulusSet::from_u64s(&[3, 5, 7]).unwrap();
    let zero = set.encode(&BigInt::zero()).unwrap();
    assert_eq!(set.decode(&zero).unwrap(), BigUint::zero());
    let max = set.encode(&BigInt::from(104)).unwrap();
    assert_eq!(set.decode(&max).unwrap(), BigUint::from(104u32));
    // 105 wraps to 0
    let wrapped = set.encode(&BigInt::from(105)).unwrap();
    assert_eq!(wrapped, zero);
}
