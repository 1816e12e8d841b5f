//! Checked evaluation
//!
//! [`CheckedEvaluator`] runs the same recurrences as the unchecked
//! evaluators, frame for frame, but turns each way they can misbehave into an
//! [`EvalError`]:
//!
//! - negative arguments, which would otherwise never reach a base case
//! - `i64` overflow, which would otherwise wrap
//! - recursion deeper than [`EvalLimits::max_depth`], which would otherwise
//!   exhaust the host stack
//!
//! Whenever a checked call succeeds its result equals the unchecked one.
//!
//! Depth is counted in evaluator frames: `power` frames and the
//! `multiply` frames nested under them add up, since they share one stack.

use crate::error::EvalError;
use tracing::debug;

/// Default recursion depth limit for checked evaluation
pub const DEFAULT_MAX_DEPTH: usize = 100_000;

/// Stack bytes budgeted per checked frame. Sized for unoptimized builds,
/// whose frames are several times larger than release ones.
pub const FRAME_BYTES_ESTIMATE: usize = 1024;

/// Resource limits for checked evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalLimits {
    /// Deepest frame allowed; frame 0 is the outermost call
    pub max_depth: usize,
}

impl EvalLimits {
    /// Limits capped to what `stack_bytes` of stack can hold.
    ///
    /// The effective depth is the smaller of `max_depth` and
    /// `stack_bytes / FRAME_BYTES_ESTIMATE`, so the guard fires before the
    /// host stack is exhausted.
    pub fn for_stack(max_depth: usize, stack_bytes: usize) -> Self {
        EvalLimits {
            max_depth: max_depth.min(stack_bytes / FRAME_BYTES_ESTIMATE),
        }
    }
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Depth-bounded, overflow-checked evaluator
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckedEvaluator {
    limits: EvalLimits,
}

impl CheckedEvaluator {
    pub fn new(limits: EvalLimits) -> Self {
        CheckedEvaluator { limits }
    }

    /// Convenience constructor for a bare depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        CheckedEvaluator::new(EvalLimits { max_depth })
    }

    pub fn limits(&self) -> EvalLimits {
        self.limits
    }

    /// Checked FibonacciTerm
    pub fn fibonacci_term(&self, n: i64) -> Result<i64, EvalError> {
        self.fibonacci_at(n, 0).inspect_err(|e| {
            debug!(n, error = %e, "checked fibonacci failed");
        })
    }

    /// Checked RepeatedAdditionMultiply
    pub fn multiply(&self, a: i64, b: i64) -> Result<i64, EvalError> {
        self.multiply_at(a, b, 0).inspect_err(|e| {
            debug!(a, b, error = %e, "checked multiply failed");
        })
    }

    /// Checked Power
    pub fn power(&self, base: i64, exponent: i64) -> Result<i64, EvalError> {
        self.power_at(base, exponent, 0).inspect_err(|e| {
            debug!(base, exponent, error = %e, "checked power failed");
        })
    }

    fn enter(&self, depth: usize) -> Result<(), EvalError> {
        if depth > self.limits.max_depth {
            return Err(EvalError::DepthExceeded {
                limit: self.limits.max_depth,
            });
        }
        Ok(())
    }

    fn fibonacci_at(&self, n: i64, depth: usize) -> Result<i64, EvalError> {
        if n < 0 {
            return Err(EvalError::NegativeIndex(n));
        }
        self.enter(depth)?;
        if n == 0 {
            return Ok(0);
        }
        if n == 1 {
            return Ok(1);
        }
        let left = self.fibonacci_at(n - 1, depth + 1)?;
        let right = self.fibonacci_at(n - 2, depth + 1)?;
        left.checked_add(right).ok_or(EvalError::Overflow {
            operation: "fibonacci",
        })
    }

    fn multiply_at(&self, a: i64, b: i64, depth: usize) -> Result<i64, EvalError> {
        if b < 0 {
            return Err(EvalError::NegativeMultiplier(b));
        }
        self.enter(depth)?;
        if b == 0 {
            return Ok(0);
        }
        let rest = self.multiply_at(a, b - 1, depth + 1)?;
        a.checked_add(rest).ok_or(EvalError::Overflow {
            operation: "multiply",
        })
    }

    fn power_at(&self, base: i64, exponent: i64, depth: usize) -> Result<i64, EvalError> {
        if exponent < 0 {
            return Err(EvalError::NegativeExponent(exponent));
        }
        self.enter(depth)?;
        if exponent == 0 {
            return Ok(1);
        }
        let previous = self.power_at(base, exponent - 1, depth + 1)?;
        self.multiply_at(base, previous, depth + 1)
    }
}
