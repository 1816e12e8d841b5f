//! Console drivers
//!
//! Each driver prompts for its inputs, evaluates on a worker thread (see
//! [`crate::stack`]) and prints the result in the fixed console format:
//!
//! ```text
//! Ingrese la cantidad de numeros de Fibonacci a mostrar: 5
//!
//! Los primeros 5 numeros de la sucesion de Fibonacci son:
//! 0, 1, 1, 2, 3.
//! ```
//!
//! ```text
//! Base: 2
//! Exponente: 8
//! 2 ^ 8 = 256
//! ```

use crate::config::DriverConfig;
use crate::console::{Console, InputError};
use crate::stack;
use recursa_core::{CheckedEvaluator, EvalError, power};
use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use tracing::{debug, warn};

pub const FIBONACCI_PROMPT: &str = "Ingrese la cantidad de numeros de Fibonacci a mostrar: ";
pub const BASE_PROMPT: &str = "Base: ";
pub const EXPONENT_PROMPT: &str = "Exponente: ";

/// Error type for driver runs
#[derive(Debug)]
pub enum DriverError {
    /// Console input could not be read as an integer
    Input(InputError),
    /// Checked evaluation rejected the inputs
    Eval(EvalError),
    /// Writing program output failed
    Io(io::Error),
    /// The evaluation thread could not be started
    Spawn(io::Error),
    /// The evaluation thread panicked
    Panicked(String),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverError::Input(e) => write!(f, "{}", e),
            DriverError::Eval(e) => write!(f, "{}", e),
            DriverError::Io(e) => write!(f, "failed to write output: {}", e),
            DriverError::Spawn(e) => write!(f, "failed to start evaluation thread: {}", e),
            DriverError::Panicked(msg) => write!(f, "evaluation panicked: {}", msg),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<InputError> for DriverError {
    fn from(e: InputError) -> Self {
        DriverError::Input(e)
    }
}

impl From<EvalError> for DriverError {
    fn from(e: EvalError) -> Self {
        DriverError::Eval(e)
    }
}

impl From<io::Error> for DriverError {
    fn from(e: io::Error) -> Self {
        DriverError::Io(e)
    }
}

/// Header line announcing `count` terms (leading newline included)
pub fn fibonacci_header(count: i64) -> String {
    format!(
        "\nLos primeros {} numeros de la sucesion de Fibonacci son:\n",
        count
    )
}

/// Result line of the power driver
pub fn power_line(base: i64, exponent: i64, result: i64) -> String {
    format!("{} ^ {} = {}\n", base, exponent, result)
}

/// Prompt for a count and print F(0)..F(count-1).
///
/// Terms are written as they are produced: `v0, v1, ..., vk.` followed by a
/// newline. A non-positive count prints the header and the newline only.
pub fn run_fibonacci<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &DriverConfig,
) -> Result<(), DriverError> {
    console.prompt(FIBONACCI_PROMPT)?;
    let count = console.read_int()?;
    debug!(count, strategy = %config.strategy, "fibonacci input");

    let out = console.out();
    out.write_all(fibonacci_header(count).as_bytes())?;

    if count > 0 {
        let strategy = config.strategy;
        let (tx, rx) = mpsc::channel();
        let worker = stack::spawn_with_stack(config.stack_size_bytes(), move || {
            for term in strategy.terms(count) {
                if tx.send(term).is_err() {
                    // Receiver gone: output failed, stop evaluating
                    break;
                }
            }
        })?;

        let mut index = 0;
        for term in rx {
            let separator = if index == count - 1 { "." } else { ", " };
            write!(out, "{}{}", term, separator)?;
            out.flush()?;
            index += 1;
        }
        stack::join(worker)?;
    }

    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Prompt for base and exponent and print `base ^ exponent = result`.
///
/// With `config.checked` set, invalid input is reported as
/// [`DriverError::Eval`]. Otherwise the unchecked evaluator runs as is and a
/// negative exponent (or a negative base with exponent >= 2) recurses until
/// the worker's stack is exhausted.
pub fn run_power<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &DriverConfig,
) -> Result<(), DriverError> {
    console.prompt(BASE_PROMPT)?;
    let base = console.read_int()?;
    console.prompt(EXPONENT_PROMPT)?;
    let exponent = console.read_int()?;
    debug!(base, exponent, checked = config.checked, "power input");

    let result = if config.checked {
        let evaluator = CheckedEvaluator::new(config.limits());
        stack::run_with_stack(config.stack_size_bytes(), move || {
            evaluator.power(base, exponent)
        })??
    } else {
        warn!("unchecked power evaluation: invalid input will not terminate cleanly");
        stack::run_with_stack(config.stack_size_bytes(), move || power(base, exponent))?
    };

    let out = console.out();
    out.write_all(power_line(base, exponent, result).as_bytes())?;
    out.flush()?;
    Ok(())
}
