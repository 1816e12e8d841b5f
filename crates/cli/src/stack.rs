//! Evaluation thread with a configurable stack
//!
//! The recursive evaluators need one stack frame per unit of input, which
//! the main thread's default stack cannot hold for realistic inputs. The
//! drivers therefore evaluate on a worker thread whose stack size comes
//! from `limits.stack_size_mib`, and join it before printing.

use crate::drivers::DriverError;
use std::thread::{self, JoinHandle};
use tracing::debug;

const WORKER_NAME: &str = "recursa-eval";

/// Spawn `f` on a named thread with `stack_size` bytes of stack
pub fn spawn_with_stack<T, F>(stack_size: usize, f: F) -> Result<JoinHandle<T>, DriverError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    debug!(stack_size, "spawning evaluation thread");
    thread::Builder::new()
        .name(WORKER_NAME.to_string())
        .stack_size(stack_size)
        .spawn(f)
        .map_err(DriverError::Spawn)
}

/// Join a worker, turning a panic into [`DriverError::Panicked`]
pub fn join<T>(handle: JoinHandle<T>) -> Result<T, DriverError> {
    handle
        .join()
        .map_err(|payload| DriverError::Panicked(format_panic_payload(&payload)))
}

/// Run `f` to completion on a worker thread with `stack_size` bytes of stack
pub fn run_with_stack<T, F>(stack_size: usize, f: F) -> Result<T, DriverError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    join(spawn_with_stack(stack_size, f)?)
}

/// Format a panic payload into an error message
pub fn format_panic_payload(payload: &Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recursa_core::repeated_addition_multiply;

    #[test]
    fn test_run_returns_value() {
        let result = run_with_stack(1024 * 1024, || 6 * 7).unwrap();
        assert_eq!(result, 42);
    }

    #[test]
    fn test_large_stack_allows_deep_recursion() {
        // ~100k frames overflows a default 2 MiB test thread in debug builds
        let result = run_with_stack(256 * 1024 * 1024, || {
            repeated_addition_multiply(1, 100_000)
        })
        .unwrap();
        assert_eq!(result, 100_000);
    }

    #[test]
    fn test_panic_is_reported() {
        let result: Result<(), _> = run_with_stack(1024 * 1024, || panic!("boom"));
        match result {
            Err(DriverError::Panicked(msg)) => assert_eq!(msg, "boom"),
            other => panic!("Expected Panicked, got {:?}", other),
        }
    }

    #[test]
    fn test_format_panic_payload() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("panic message");
        assert_eq!(format_panic_payload(&payload), "panic message");

        let payload: Box<dyn std::any::Any + Send> = Box::new("owned panic".to_string());
        assert_eq!(format_panic_payload(&payload), "owned panic");

        let payload: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(format_panic_payload(&payload), "unknown panic");
    }
}
