//! Bézout identity and modular inverse reports.

use std::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use rns_core::{extended_gcd, mod_inverse, BezoutTriple, RnsError};
use serde::Serialize;

use crate::error::{CalcError, Result};

/// `gcd(a, b)` with its Bézout coefficients and the identity check.
#[derive(Debug, Clone, Serialize)]
pub struct GcdReport {
    pub a: String,
    pub b: String,
    #[serde(flatten)]
    pub bezout: BezoutTriple,
    pub identity_holds: bool,
}

pub fn gcd_report(a: &BigInt, b: &BigInt) -> GcdReport {
    let bezout = extended_gcd(a, b);
    GcdReport {
        a: a.to_string(),
        b: b.to_string(),
        identity_holds: bezout.verify(a, b),
        bezout,
    }
}

impl fmt::Display for GcdReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.bezout;
        writeln!(f, "  gcd({}, {}) = {}", self.a, self.b, t.gcd)?;
        writeln!(f, "  Coefficients: x = {}, y = {}", t.x, t.y)?;
        writeln!(
            f,
            "  Bezout identity: ({} * {}) + ({} * {}) = {} ({})",
            self.a,
            t.x,
            self.b,
            t.y,
            t.gcd,
            if self.identity_holds { "holds" } else { "VIOLATED" }
        )
    }
}

/// `a^{-1} mod m`, or the reason it does not exist.
#[derive(Debug, Clone, Serialize)]
pub struct InverseReport {
    pub a: String,
    pub m: String,
    pub inverse: Option<String>,
    /// `(a * inverse) mod m`, which is 1 (0 when m = 1).
    pub check: Option<String>,
    /// gcd(a, m) when no inverse exists.
    pub gcd: Option<String>,
}

/// Build an inverse report. A missing inverse is an ordinary outcome and
/// lands in the report; any other engine error is returned.
pub fn inverse_report(a: &BigInt, m: &BigUint) -> Result<InverseReport> {
    let mut report = InverseReport {
        a: a.to_string(),
        m: m.to_string(),
        inverse: None,
        check: None,
        gcd: None,
    };
    match mod_inverse(a, m) {
        Ok(inv) => {
            let check = (a * BigInt::from(inv.clone())).mod_floor(&BigInt::from(m.clone()));
            report.inverse = Some(inv.to_string());
            report.check = Some(check.to_string());
        }
        Err(RnsError::NoInverse { gcd, .. }) => {
            report.gcd = Some(gcd.to_string());
        }
        Err(e) => return Err(CalcError::engine("modular inverse")(e)),
    }
    Ok(report)
}

impl fmt::Display for InverseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.inverse, &self.check, &self.gcd) {
            (Some(inv), Some(check), _) => {
                writeln!(f, "  Inverse of {} mod {} is {}", self.a, self.m, inv)?;
                writeln!(f, "  Check: ({} * {}) mod {} = {}", self.a, inv, self.m, check)
            }
            (_, _, Some(gcd)) => {
                writeln!(f, "  Inverse of {} mod {} does not exist", self.a, self.m)?;
                writeln!(f, "  Reason: gcd({}, {}) = {}, not coprime", self.a, self.m, gcd)
            }
            _ => writeln!(f, "  No result for {} mod {}", self.a, self.m),
        }
    }
}
