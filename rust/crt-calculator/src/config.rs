//! Command-line and file configuration.
//!
//! Arguments follow the `--key=value` convention:
//!   --mode=crt|gcd|inverse   What to run (default: crt)
//!   --moduli=3,5,7           Comma-separated modulus set (default: 3,5,7)
//!   --a=<int> --b=<int>      Operands (default: 37 and 50)
//!   --m=<int>                Modulus for --mode=inverse (default: 7)
//!   --op=<op>|all            + - * / or add/sub/mul/div, or all four (default: +)
//!   --config=<file>          JSON session file; replaces --moduli/--a/--b/--op
//!   --json                   Print reports as JSON

use std::path::{Path, PathBuf};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use rns_core::Operation;
use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Crt,
    Gcd,
    Inverse,
}

impl FromStr for Mode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "crt" => Ok(Mode::Crt),
            "gcd" | "bezout" => Ok(Mode::Gcd),
            "inverse" | "inv" => Ok(Mode::Inverse),
            _ => Err(CalcError::Parse {
                field: "mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// CLI configuration parsed from command-line arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub mode: Mode,
    pub moduli: Vec<BigUint>,
    pub a: BigInt,
    pub b: BigInt,
    pub m: BigUint,
    pub ops: Vec<Operation>,
    pub config_file: Option<PathBuf>,
    pub json: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            mode: Mode::Crt,
            moduli: [3u32, 5, 7].iter().map(|&m| BigUint::from(m)).collect(),
            a: BigInt::from(37),
            b: BigInt::from(50),
            m: BigUint::from(7u32),
            ops: vec![Operation::Add],
            config_file: None,
            json: false,
        }
    }
}

impl CliConfig {
    /// Parse `--key=value` arguments. Positional arguments such as the
    /// program name are skipped; `--` arguments that name no known option
    /// are skipped with a warning.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = CliConfig::default();
        for arg in unrecognized_args(args) {
            log::warn!("ignoring unrecognized argument '{}' (options take the form --key=value)", arg);
        }
        let value_of = |key: &str| arg_value(args, key);

        if let Some(mode) = value_of("mode") {
            config.mode = mode.parse()?;
        }
        if let Some(moduli) = value_of("moduli") {
            config.moduli = parse_list("moduli", moduli)?;
        }
        if let Some(a) = value_of("a") {
            config.a = parse_number("a", a)?;
        }
        if let Some(b) = value_of("b") {
            config.b = parse_number("b", b)?;
        }
        if let Some(m) = value_of("m") {
            config.m = parse_number("m", m)?;
        }
        if let Some(op) = value_of("op") {
            config.ops = parse_ops(op)?;
        }
        config.config_file = value_of("config").map(PathBuf::from);
        config.json = args.iter().any(|a| a == "--json");

        Ok(config)
    }
}

const VALUE_KEYS: [&str; 7] = ["mode", "moduli", "a", "b", "m", "op", "config"];
const FLAGS: [&str; 1] = ["json"];

/// `--` arguments that are neither a known `--key=value` option nor a known
/// flag. A known key given without `=` (`--moduli 4 6`) is reported too.
pub fn unrecognized_args(args: &[String]) -> Vec<&str> {
    args.iter()
        .map(String::as_str)
        .filter(|arg| match arg.strip_prefix("--") {
            Some(option) => match option.split_once('=') {
                Some((key, _)) => !VALUE_KEYS.contains(&key),
                None => !FLAGS.contains(&option),
            },
            None => false,
        })
        .collect()
}

/// Value of the last `--key=value` argument for `key`.
fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    let prefix = format!("--{}=", key);
    args.iter().rev().find_map(|a| a.strip_prefix(prefix.as_str()))
}

/// One calculation in a session file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseConfig {
    pub a: String,
    pub b: String,
    pub op: Operation,
}

/// A JSON session file. Integers are decimal strings so values wider than
/// 64 bits survive the round trip through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub moduli: Vec<String>,
    pub cases: Vec<CaseConfig>,
}

impl SessionConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: SessionConfig = serde_json::from_str(&contents)?;
        if config.cases.is_empty() {
            return Err(CalcError::Config(format!("{} lists no cases", path.display())));
        }
        log::info!(
            "Loaded session with {} moduli and {} cases from {}",
            config.moduli.len(),
            config.cases.len(),
            path.display()
        );
        Ok(config)
    }

    pub fn parse_moduli(&self) -> Result<Vec<BigUint>> {
        self.moduli.iter().map(|m| parse_number("moduli", m)).collect()
    }

    /// Parse every case into operands and operator.
    pub fn parse_cases(&self) -> Result<Vec<(BigInt, BigInt, Operation)>> {
        self.cases
            .iter()
            .map(|c| -> Result<(BigInt, BigInt, Operation)> {
                Ok((parse_number("a", &c.a)?, parse_number("b", &c.b)?, c.op))
            })
            .collect()
    }
}

fn parse_number<T: FromStr>(field: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| CalcError::Parse {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Parse a comma-separated list such as `3,5,7`.
pub fn parse_list(field: &str, value: &str) -> Result<Vec<BigUint>> {
    value
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_number(field, s))
        .collect()
}

fn parse_ops(value: &str) -> Result<Vec<Operation>> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(Operation::ALL.to_vec());
    }
    value
        .split(',')
        .map(|s| {
            s.parse::<Operation>().map_err(|_| CalcError::Parse {
                field: "op".to_string(),
                value: s.to_string(),
            })
        })
        .collect()
}
