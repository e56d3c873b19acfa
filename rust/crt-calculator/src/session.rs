//! Calculator sessions: encode operands, combine residues, reconstruct and
//! cross-check against plain integer arithmetic.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use rns_core::{ModulusSet, Operation, ResidueVector};
use serde::Serialize;

use crate::error::{CalcError, Result};

/// Independent check of a reconstructed result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verification {
    /// `((a op b) mod M + M) mod M` computed on plain integers.
    Plain { expected: String, matches: bool },
    /// For division: `(b * result) mod M` must equal `a mod M`.
    Division {
        product: String,
        dividend: String,
        matches: bool,
    },
}

impl Verification {
    pub fn passed(&self) -> bool {
        match self {
            Verification::Plain { matches, .. } | Verification::Division { matches, .. } => *matches,
        }
    }
}

/// Successful evaluation of `a op b` through the residue system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub lhs: ResidueVector,
    pub rhs: ResidueVector,
    pub result: ResidueVector,
    pub value: BigUint,
    pub verification: Verification,
}

/// A calculator bound to one validated modulus set.
#[derive(Debug, Clone)]
pub struct Calculator {
    set: ModulusSet,
}

impl Calculator {
    pub fn new(moduli: Vec<BigUint>) -> Result<Self> {
        let set = ModulusSet::new(moduli).map_err(CalcError::engine("modulus set validation"))?;
        Ok(Calculator { set })
    }

    pub fn modulus_set(&self) -> &ModulusSet {
        &self.set
    }

    /// Evaluate `a op b`. Every step's error is propagated with the name of
    /// the step, including reconstruction after the arithmetic.
    pub fn evaluate(&self, a: &BigInt, b: &BigInt, op: Operation) -> Result<Evaluation> {
        let lhs = self.set.encode(a).map_err(CalcError::engine("encode A"))?;
        let rhs = self.set.encode(b).map_err(CalcError::engine("encode B"))?;
        let result = self
            .set
            .apply(&lhs, &rhs, op)
            .map_err(CalcError::engine(op_step(op)))?;
        let value = self
            .set
            .decode(&result)
            .map_err(CalcError::engine("reconstruction"))?;
        let verification = self.verify(a, b, op, &value);

        log::debug!("{} {} {} -> {} = {}", lhs, op, rhs, result, value);
        Ok(Evaluation {
            lhs,
            rhs,
            result,
            value,
            verification,
        })
    }

    fn verify(&self, a: &BigInt, b: &BigInt, op: Operation, value: &BigUint) -> Verification {
        let m = BigInt::from(self.set.product().clone());
        let value = BigInt::from(value.clone());
        match op.apply_plain(a, b) {
            Some(plain) => {
                let expected = plain.mod_floor(&m);
                Verification::Plain {
                    matches: expected == value,
                    expected: expected.to_string(),
                }
            }
            None => {
                let product = (b * &value).mod_floor(&m);
                let dividend = a.mod_floor(&m);
                Verification::Division {
                    matches: product == dividend,
                    product: product.to_string(),
                    dividend: dividend.to_string(),
                }
            }
        }
    }

    /// Evaluate one case, recording a failure in the report instead of
    /// aborting the session.
    pub fn run_case(&self, a: &BigInt, b: &BigInt, op: Operation) -> CaseReport {
        let mut report = CaseReport {
            a: a.to_string(),
            b: b.to_string(),
            op,
            lhs: None,
            rhs: None,
            result: None,
            value: None,
            verification: None,
            error: None,
        };
        match self.evaluate(a, b, op) {
            Ok(eval) => {
                report.lhs = Some(eval.lhs);
                report.rhs = Some(eval.rhs);
                report.result = Some(eval.result);
                report.value = Some(eval.value.to_string());
                report.verification = Some(eval.verification);
            }
            Err(e) => {
                log::warn!("{} {} {}: {}", a, op, b, e);
                report.error = Some(e.to_string());
            }
        }
        report
    }

    pub fn run_session(&self, cases: &[(BigInt, BigInt, Operation)]) -> SessionReport {
        let cases: Vec<CaseReport> = cases.iter().map(|(a, b, op)| self.run_case(a, b, *op)).collect();
        let passed = cases.iter().filter(|c| c.passed()).count();
        SessionReport {
            moduli: self.set.moduli().iter().map(|m| m.to_string()).collect(),
            product: self.set.product().to_string(),
            failed: cases.len() - passed,
            passed,
            cases,
        }
    }
}

fn op_step(op: Operation) -> &'static str {
    match op {
        Operation::Add => "residue addition",
        Operation::Sub => "residue subtraction",
        Operation::Mul => "residue multiplication",
        Operation::Div => "residue division",
    }
}

/// Outcome of one calculation.
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    pub a: String,
    pub b: String,
    pub op: Operation,
    pub lhs: Option<ResidueVector>,
    pub rhs: Option<ResidueVector>,
    pub result: Option<ResidueVector>,
    pub value: Option<String>,
    pub verification: Option<Verification>,
    pub error: Option<String>,
}

impl CaseReport {
    /// True when the case evaluated and its verification matched.
    pub fn passed(&self) -> bool {
        self.error.is_none() && self.verification.as_ref().is_some_and(Verification::passed)
    }
}

impl fmt::Display for CaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {} {} {}", self.a, self.op, self.b)?;
        if let Some(error) = &self.error {
            writeln!(f, "    Error: {}", error)?;
            return Ok(());
        }
        if let (Some(lhs), Some(rhs), Some(result)) = (&self.lhs, &self.rhs, &self.result) {
            writeln!(f, "    Vector operation: {} {} {} = {}", lhs, self.op, rhs, result)?;
        }
        if let Some(value) = &self.value {
            writeln!(f, "    Reconstructed:    {}", value)?;
        }
        match &self.verification {
            Some(Verification::Plain { expected, matches }) => {
                writeln!(f, "    Plain check:      {} ({})", expected, status(*matches))?;
            }
            Some(Verification::Division {
                product,
                dividend,
                matches,
            }) => {
                writeln!(
                    f,
                    "    Division check:   B * result = {}, A = {} ({})",
                    product,
                    dividend,
                    status(*matches)
                )?;
            }
            None => {}
        }
        Ok(())
    }
}

fn status(matches: bool) -> &'static str {
    if matches {
        "PASS"
    } else {
        "FAIL"
    }
}

/// All cases run against one modulus set.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub moduli: Vec<String>,
    pub product: String,
    pub cases: Vec<CaseReport>,
    pub passed: usize,
    pub failed: usize,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Moduli:           ({})", self.moduli.join(", "))?;
        writeln!(f, "  Range M:          {}", self.product)?;
        writeln!(f)?;
        for case in &self.cases {
            write!(f, "{}", case)?;
        }
        writeln!(f)?;
        writeln!(f, "  Passed: {}  Failed: {}", self.passed, self.failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(ms: &[u32]) -> Calculator {
        Calculator::new(ms.iter().map(|&m| BigUint::from(m)).collect()).unwrap()
    }

    #[test]
    fn test_evaluate_add() {
        let c = calc(&[3, 5, 7]);
        let eval = c
            .evaluate(&BigInt::from(37), &BigInt::from(50), Operation::Add)
            .unwrap();
        assert_eq!(eval.lhs.to_string(), "[1, 2, 2]");
        assert_eq!(eval.value, BigUint::from(87u32));
        assert!(eval.verification.passed());
    }

    #[test]
    fn test_evaluate_sub_negative_result() {
        let c = calc(&[3, 5, 7]);
        let eval = c
            .evaluate(&BigInt::from(37), &BigInt::from(50), Operation::Sub)
            .unwrap();
        assert_eq!(eval.value, BigUint::from(92u32));
        assert_eq!(
            eval.verification,
            Verification::Plain {
                expected: "92".to_string(),
                matches: true
            }
        );
    }

    #[test]
    fn test_evaluate_div_checked_by_multiplication() {
        let c = calc(&[5]);
        let eval = c
            .evaluate(&BigInt::from(4), &BigInt::from(3), Operation::Div)
            .unwrap();
        assert_eq!(eval.value, BigUint::from(3u32));
        assert!(matches!(eval.verification, Verification::Division { matches: true, .. }));
    }

    #[test]
    fn test_division_failure_names_step_and_component() {
        let c = calc(&[3, 5, 7]);
        let err = c
            .evaluate(&BigInt::from(37), &BigInt::from(50), Operation::Div)
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("residue division failed"), "{}", msg);
        assert!(msg.contains("component 1"), "{}", msg);
    }

    #[test]
    fn test_non_coprime_set_rejected() {
        let err = Calculator::new(vec![BigUint::from(4u32), BigUint::from(6u32)]).unwrap_err();
        assert!(err.to_string().starts_with("modulus set validation failed"));
    }

    #[test]
    fn test_session_counts() {
        let c = calc(&[3, 5, 7]);
        let cases = vec![
            (BigInt::from(37), BigInt::from(50), Operation::Add),
            (BigInt::from(37), BigInt::from(50), Operation::Mul),
            (BigInt::from(37), BigInt::from(50), Operation::Div),
        ];
        let report = c.run_session(&cases);
        assert_eq!(report.product, "105");
        assert_eq!(report.passed, 2);
        assert_eq!(report.failed, 1);
        assert!(report.cases[2].error.is_some());
        let text = report.to_string();
        assert!(text.contains("Reconstructed:    87"));
        assert!(text.contains("Passed: 2  Failed: 1"));
    }

    #[test]
    fn test_case_report_json() {
        let c = calc(&[3, 5, 7]);
        let report = c.run_case(&BigInt::from(37), &BigInt::from(50), Operation::Add);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["op"], "add");
        assert_eq!(json["value"], "87");
        assert_eq!(json["lhs"], serde_json::json!(["1", "2", "2"]));
        assert_eq!(json["verification"]["kind"], "plain");
    }
}
