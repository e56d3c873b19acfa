//! crt-calculator: residue number system calculator.
//!
//! Modes:
//!   --mode=crt --moduli=3,5,7 --a=37 --b=50 --op=all   Run a CRT session
//!   --mode=crt --config=session.json                     Run a session file
//!   --mode=gcd --a=240 --b=46                            Bezout coefficients
//!   --mode=inverse --a=3 --m=7                           Modular inverse
//!
//! Add --json for machine-readable output. Set RUST_LOG=debug for engine
//! tracing.

use serde::Serialize;

use crt_calculator::{gcd_report, inverse_report, run_crt, CalcError, CliConfig, Mode};

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), CalcError> {
    let config = CliConfig::from_args(args)?;

    match config.mode {
        Mode::Crt => {
            let report = run_crt(&config)?;
            emit(&config, "Chinese Remainder Theorem Calculator", &report)?;
            if report.failed > 0 {
                log::warn!("{} of {} cases failed", report.failed, report.cases.len());
            }
        }
        Mode::Gcd => {
            let report = gcd_report(&config.a, &config.b);
            emit(&config, "Extended Euclidean Algorithm", &report)?;
        }
        Mode::Inverse => {
            let report = inverse_report(&config.a, &config.m)?;
            emit(&config, "Modular Multiplicative Inverse", &report)?;
        }
    }
    Ok(())
}

/// Print a report as text with a banner, or as pretty JSON.
fn emit<T: Serialize + std::fmt::Display>(
    config: &CliConfig,
    title: &str,
    report: &T,
) -> Result<(), CalcError> {
    if config.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("========================================");
    println!("  {}", title);
    println!("========================================");
    println!();
    print!("{}", report);
    Ok(())
}
