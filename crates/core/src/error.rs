//! Evaluation error types.

/// Error type for the checked evaluators.
///
/// Each variant corresponds to an input the unchecked evaluators either
/// never return from (negative arguments, unbounded depth) or silently wrap
/// (overflow).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// FibonacciTerm called with a negative index
    NegativeIndex(i64),
    /// RepeatedAdditionMultiply called with a negative multiplier
    NegativeMultiplier(i64),
    /// Power called with a negative exponent
    NegativeExponent(i64),
    /// An addition left the `i64` range
    Overflow { operation: &'static str },
    /// Recursion went deeper than the configured limit
    DepthExceeded { limit: usize },
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::NegativeIndex(n) => {
                write!(f, "fibonacci: index must be non-negative (got {})", n)
            }
            EvalError::NegativeMultiplier(b) => {
                write!(f, "multiply: multiplier must be non-negative (got {})", b)
            }
            EvalError::NegativeExponent(e) => {
                write!(f, "power: exponent must be non-negative (got {})", e)
            }
            EvalError::Overflow { operation } => {
                write!(f, "{}: integer overflow", operation)
            }
            EvalError::DepthExceeded { limit } => {
                write!(f, "recursion depth exceeded limit of {}", limit)
            }
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            EvalError::NegativeExponent(-3).to_string(),
            "power: exponent must be non-negative (got -3)"
        );
        assert_eq!(
            EvalError::Overflow {
                operation: "multiply"
            }
            .to_string(),
            "multiply: integer overflow"
        );
        assert_eq!(
            EvalError::DepthExceeded { limit: 10 }.to_string(),
            "recursion depth exceeded limit of 10"
        );
    }
}
