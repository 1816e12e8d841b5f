//! Fibonacci term evaluation
//!
//! [`fibonacci_term`] is the default evaluator: plain double recursion
//! with no cache, so F(n) costs O(φⁿ) calls. The memoized and iterative
//! functions are alternatives a caller opts into through
//! [`FibonacciStrategy`]; they never stand in for the recursive one.
//!
//! All additions wrap on overflow (F(93) does not fit in `i64`).

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// n-th term of the Fibonacci sequence by naive recursion.
///
/// F(0) = 0, F(1) = 1, F(n) = F(n-1) + F(n-2).
///
/// A negative `n` matches neither base case and recurses until the stack is
/// exhausted. Callers that can receive negative input should go through
/// [`crate::CheckedEvaluator::fibonacci_term`].
pub fn fibonacci_term(n: i64) -> i64 {
    if n == 0 {
        return 0;
    }
    if n == 1 {
        return 1;
    }
    fibonacci_term(n - 1).wrapping_add(fibonacci_term(n - 2))
}

/// Subresult cache for [`fibonacci_memoized`], keyed by index.
///
/// Owned by the caller; reuse one cache across calls to share work.
#[derive(Debug, Default, Clone)]
pub struct FibonacciCache {
    terms: HashMap<i64, i64>,
}

impl FibonacciCache {
    pub fn new() -> Self {
        FibonacciCache::default()
    }

    /// Number of cached terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, n: i64) -> Option<i64> {
        self.terms.get(&n).copied()
    }
}

/// Same recurrence as [`fibonacci_term`], with every subresult cached.
///
/// Linear in `n` on a cold cache. Recursion depth is still `n`.
pub fn fibonacci_memoized(n: i64, cache: &mut FibonacciCache) -> i64 {
    if n == 0 {
        return 0;
    }
    if n == 1 {
        return 1;
    }
    if let Some(term) = cache.get(n) {
        return term;
    }
    let term = fibonacci_memoized(n - 1, cache).wrapping_add(fibonacci_memoized(n - 2, cache));
    cache.terms.insert(n, term);
    term
}

/// Loop-based variant with constant stack usage. Returns 0 for `n <= 0`.
pub fn fibonacci_iterative(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let mut a: i64 = 0;
    let mut b: i64 = 1;
    for _ in 1..n {
        let next = a.wrapping_add(b);
        a = b;
        b = next;
    }
    b
}

/// Which Fibonacci evaluator a driver uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FibonacciStrategy {
    /// Naive double recursion (default)
    #[default]
    Recursive,
    /// Recursion with a subresult cache keyed by index
    Memoized,
    /// Constant-stack loop
    Iterative,
}

impl FibonacciStrategy {
    pub const ALL: [FibonacciStrategy; 3] = [
        FibonacciStrategy::Recursive,
        FibonacciStrategy::Memoized,
        FibonacciStrategy::Iterative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FibonacciStrategy::Recursive => "recursive",
            FibonacciStrategy::Memoized => "memoized",
            FibonacciStrategy::Iterative => "iterative",
        }
    }

    /// Lazily yield terms F(0)..F(count-1).
    ///
    /// A non-positive `count` yields nothing. With [`FibonacciStrategy::Memoized`]
    /// one cache is shared by all terms of the sequence.
    pub fn terms(self, count: i64) -> Terms {
        Terms {
            strategy: self,
            next: 0,
            count,
            cache: FibonacciCache::new(),
        }
    }
}

impl fmt::Display for FibonacciStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FibonacciStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FibonacciStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown fibonacci strategy '{}' (expected recursive, memoized or iterative)",
                    s
                )
            })
    }
}

/// Evaluate F(n) with the given strategy.
///
/// The memoized strategy starts from an empty cache on every call; use
/// [`FibonacciStrategy::terms`] to share one across a sequence.
pub fn fibonacci_with(strategy: FibonacciStrategy, n: i64) -> i64 {
    match strategy {
        FibonacciStrategy::Recursive => fibonacci_term(n),
        FibonacciStrategy::Memoized => fibonacci_memoized(n, &mut FibonacciCache::new()),
        FibonacciStrategy::Iterative => fibonacci_iterative(n),
    }
}

/// Iterator returned by [`FibonacciStrategy::terms`]
#[derive(Debug)]
pub struct Terms {
    strategy: FibonacciStrategy,
    next: i64,
    count: i64,
    cache: FibonacciCache,
}

impl Iterator for Terms {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.next >= self.count {
            return None;
        }
        let n = self.next;
        self.next += 1;
        let term = match self.strategy {
            FibonacciStrategy::Memoized => fibonacci_memoized(n, &mut self.cache),
            other => fibonacci_with(other, n),
        };
        Some(term)
    }
}
