//! Power by repeated multiplication, multiplication by repeated addition
//!
//! Both evaluators recurse once per unit of their second argument, so
//! `power(b, e)` reaches a stack depth of `e` in its own frames plus up to
//! `b^(e-1)` frames inside [`repeated_addition_multiply`].
//!
//! # Overflow Behavior
//!
//! Additions use **wrapping semantics**, matching the rest of the crate.

/// `a * b` computed as `b` recursive additions of `a`.
///
/// M(a, 0) = 0, M(a, b) = a + M(a, b-1).
///
/// Only `b == 0` terminates the recursion: a negative `b` walks toward
/// negative infinity until the stack is exhausted.
pub fn repeated_addition_multiply(a: i64, b: i64) -> i64 {
    if b == 0 {
        return 0;
    }
    a.wrapping_add(repeated_addition_multiply(a, b - 1))
}

/// `base ^ exponent` where each multiplication is a
/// [`repeated_addition_multiply`].
///
/// P(b, 0) = 1, P(b, e) = M(b, P(b, e-1)).
///
/// A negative exponent never reaches the base case. A negative base with
/// `exponent >= 2` does not terminate either: P(b, 1) = b lands in the
/// multiplier slot of the next M.
pub fn power(base: i64, exponent: i64) -> i64 {
    if exponent == 0 {
        return 1;
    }
    repeated_addition_multiply(base, power(base, exponent - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_by_zero() {
        for a in [-7, 0, 1, 42, i64::MAX] {
            assert_eq!(repeated_addition_multiply(a, 0), 0);
        }
    }

    #[test]
    fn test_multiply_matches_native() {
        for a in -12..=12 {
            for b in 0..=40 {
                assert_eq!(repeated_addition_multiply(a, b), a * b, "{} * {}", a, b);
            }
        }
    }

    #[test]
    fn test_multiply_wraps() {
        assert_eq!(
            repeated_addition_multiply(i64::MAX, 2),
            i64::MAX.wrapping_mul(2)
        );
    }

    #[test]
    fn test_power_examples() {
        assert_eq!(power(2, 10), 1024);
        assert_eq!(power(5, 0), 1);
        assert_eq!(power(0, 5), 0);
        assert_eq!(power(3, 4), 81);
        assert_eq!(power(2, 8), 256);
    }

    #[test]
    fn test_power_matches_native() {
        for base in 0..=6i64 {
            for exponent in 0..=6u32 {
                assert_eq!(
                    power(base, exponent as i64),
                    base.pow(exponent),
                    "{} ^ {}",
                    base,
                    exponent
                );
            }
        }
    }

    #[test]
    fn test_negative_base_single_step() {
        // Exponent 1 never puts the base in the multiplier slot
        assert_eq!(power(-3, 1), -3);
        assert_eq!(power(-3, 0), 1);
    }

    #[test]
    fn test_power_deterministic() {
        assert_eq!(power(7, 3), power(7, 3));
    }
}
