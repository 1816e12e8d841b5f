//! Recursa Core: recursive integer evaluators
//!
//! Two independent families of pure functions over `i64`:
//!
//! - `fibonacci`: n-th Fibonacci term by naive double recursion, plus
//!   opt-in memoized and iterative variants selected by [`FibonacciStrategy`]
//! - `arithmetic`: power expressed as repeated multiplication, where the
//!   multiplication is itself repeated addition
//!
//! # Overflow Behavior
//!
//! The unchecked evaluators use **wrapping semantics**: a result that does
//! not fit in `i64` wraps around, nothing is reported. Use the `checked`
//! module when overflow, negative inputs or runaway recursion depth must be
//! reported instead.
//!
//! # Modules
//!
//! - `fibonacci`: FibonacciTerm and its alternative strategies
//! - `arithmetic`: RepeatedAdditionMultiply and Power
//! - `checked`: depth-bounded, overflow-checked variants of all three
//! - `error`: evaluation errors raised by the checked variants

pub mod arithmetic;
pub mod checked;
pub mod error;
pub mod fibonacci;

pub use arithmetic::{power, repeated_addition_multiply};
pub use checked::{CheckedEvaluator, DEFAULT_MAX_DEPTH, EvalLimits, FRAME_BYTES_ESTIMATE};
pub use error::EvalError;
pub use fibonacci::{
    FibonacciCache, FibonacciStrategy, fibonacci_iterative, fibonacci_memoized, fibonacci_term,
    fibonacci_with,
};
