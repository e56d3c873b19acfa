//! Calculator driver for the residue number system engine.
//!
//! Runs non-interactive sessions: each case encodes two operands under a
//! validated modulus set, combines their residues, reconstructs the result
//! and cross-checks it against plain integer arithmetic. Also reports Bézout
//! coefficients and modular inverses.

pub mod config;
pub mod error;
pub mod identities;
pub mod session;

pub use config::{CaseConfig, CliConfig, Mode, SessionConfig};
pub use error::{CalcError, Result};
pub use identities::{gcd_report, inverse_report, GcdReport, InverseReport};
pub use session::{CaseReport, Calculator, Evaluation, SessionReport, Verification};

/// Run a CRT session described by `config`: the JSON session file when one
/// is given, otherwise the moduli, operands and operators from the arguments.
pub fn run_crt(config: &CliConfig) -> Result<SessionReport> {
    let (moduli, cases) = match &config.config_file {
        Some(path) => {
            let session = SessionConfig::load(path)?;
            (session.parse_moduli()?, session.parse_cases()?)
        }
        None => {
            let cases = config
                .ops
                .iter()
                .map(|&op| (config.a.clone(), config.b.clone(), op))
                .collect();
            (config.moduli.clone(), cases)
        }
    };

    let calculator = Calculator::new(moduli)?;
    Ok(calculator.run_session(&cases))
}
