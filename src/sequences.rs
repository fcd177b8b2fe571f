//! # Sequences — Fibonacci, Pascal's Triangle, Collatz Trajectories
//!
//! Three self-contained generators. None touches the sieve.
//!
//! - **Fibonacci** uses `rug::Integer`; terms outgrow `u64` at F(94) and the
//!   scaler allows tens of thousands of terms.
//! - **Pascal** stays in `u64` and fails once an entry would overflow, which
//!   first happens in row 68 (C(68, 34) > 2^64).
//! - **Collatz** stays in `u64` with checked arithmetic and a step limit, so a
//!   runaway trajectory aborts instead of spinning.

use rug::{Integer, Rational};
use serde::Serialize;

use crate::error::ComputeError;

/// Largest row count whose entries all fit in `u64`.
pub const MAX_PASCAL_ROWS: usize = 68;

// ── Fibonacci ───────────────────────────────────────────────────

/// Streaming Fibonacci generator starting from the seed `0, 1`.
pub struct FibonacciIter {
    a: Integer,
    b: Integer,
}

impl FibonacciIter {
    pub fn new() -> Self {
        FibonacciIter {
            a: Integer::from(0),
            b: Integer::from(1),
        }
    }
}

impl Default for FibonacciIter {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FibonacciIter {
    type Item = Integer;

    fn next(&mut self) -> Option<Integer> {
        let next = Integer::from(&self.a + &self.b);
        let out = std::mem::replace(&mut self.a, std::mem::replace(&mut self.b, next));
        Some(out)
    }
}

/// The first `length` Fibonacci numbers. For `length ≤ 2` the seed `[0, 1]`
/// comes back unmodified.
pub fn fibonacci(length: usize) -> Vec<Integer> {
    FibonacciIter::new().take(length.max(2)).collect()
}

/// Summary of a Fibonacci run that never holds more than two large terms.
#[derive(Debug, Clone, Serialize)]
pub struct FibonacciSummary {
    pub sequence_length: usize,
    /// Decimal string; the value is usually far beyond any JSON number.
    pub last_number: String,
    pub golden_ratio_approximation: f64,
    pub even_count: usize,
    pub odd_count: usize,
}

/// Walk `length` terms (at least the two seed terms) and summarise them,
/// also returning the first `leading` terms.
pub fn summarize_fibonacci(length: usize, leading: usize) -> (Vec<u64>, FibonacciSummary) {
    let length = length.max(2);
    let mut head = Vec::with_capacity(leading.min(length));
    let mut prev = Integer::new();
    let mut last = Integer::new();
    let mut even_count = 0;

    for (i, term) in FibonacciIter::new().take(length).enumerate() {
        if term.is_even() {
            even_count += 1;
        }
        if i < leading {
            // The first 93 terms fit in u64
            head.extend(term.to_u64());
        }
        prev = std::mem::replace(&mut last, term);
    }

    let golden_ratio_approximation = if prev == 0 {
        0.0
    } else {
        Rational::from((last.clone(), prev)).to_f64()
    };

    let summary = FibonacciSummary {
        sequence_length: length,
        last_number: last.to_string(),
        golden_ratio_approximation,
        even_count,
        odd_count: length - even_count,
    };
    (head, summary)
}

// ── Pascal's Triangle ───────────────────────────────────────────

/// Build `rows` rows of Pascal's triangle by the additive recurrence.
///
/// Row `i` has `i + 1` entries, `C(i, j)`. Fails with `ComputationOverflow`
/// when an entry leaves the `u64` range.
pub fn pascal_triangle(rows: usize) -> Result<Vec<Vec<u64>>, ComputeError> {
    let mut triangle: Vec<Vec<u64>> = Vec::with_capacity(rows);
    for i in 0..rows {
        let mut row = Vec::with_capacity(i + 1);
        row.push(1);
        if i > 0 {
            let prev = &triangle[i - 1];
            for j in 1..i {
                let entry = prev[j - 1]
                    .checked_add(prev[j])
                    .ok_or_else(|| ComputeError::overflow("pascal rows", rows, MAX_PASCAL_ROWS))?;
                row.push(entry);
            }
            row.push(1);
        }
        triangle.push(row);
    }
    Ok(triangle)
}

// ── Collatz ─────────────────────────────────────────────────────

/// A Collatz run from `start` down to 1.
///
/// `length` counts every value visited, including `start` and the final 1,
/// so the trajectory of 27 has length 112. `sequence` is only a prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollatzTrajectory {
    pub start: u64,
    pub length: usize,
    pub sequence: Vec<u64>,
}

#[inline]
fn collatz_step(n: u64) -> Option<u64> {
    if n % 2 == 0 {
        Some(n / 2)
    } else {
        n.checked_mul(3)?.checked_add(1)
    }
}

fn checked_start(start: i64) -> Result<u64, ComputeError> {
    if start <= 0 {
        return Err(ComputeError::invalid(format!(
            "collatz start must be positive, got {}",
            start
        )));
    }
    Ok(start as u64)
}

/// Run the Collatz map from `start`, keeping only the first `prefix` values.
///
/// Fails with `InvalidInput` for `start ≤ 0` and with `ComputationOverflow`
/// if a value leaves `u64` or the run needs more than `max_steps` steps.
pub fn collatz_trajectory(
    start: i64,
    max_steps: usize,
    prefix: usize,
) -> Result<CollatzTrajectory, ComputeError> {
    let first = checked_start(start)?;
    let mut n = first;
    let mut length = 1;
    let mut sequence = Vec::with_capacity(prefix);
    if prefix > 0 {
        sequence.push(n);
    }

    while n != 1 {
        if length > max_steps {
            return Err(ComputeError::overflow("collatz steps", first, max_steps));
        }
        n = collatz_step(n).ok_or_else(|| ComputeError::overflow("collatz value", first, u64::MAX))?;
        length += 1;
        if sequence.len() < prefix {
            sequence.push(n);
        }
    }

    Ok(CollatzTrajectory {
        start: first,
        length,
        sequence,
    })
}

/// The complete Collatz trajectory from `start`, ending in 1.
pub fn collatz_sequence(start: i64, max_steps: usize) -> Result<Vec<u64>, ComputeError> {
    let first = checked_start(start)?;
    let mut n = first;
    let mut seq = vec![n];
    while n != 1 {
        if seq.len() > max_steps {
            return Err(ComputeError::overflow("collatz steps", first, max_steps));
        }
        n = collatz_step(n).ok_or_else(|| ComputeError::overflow("collatz value", first, u64::MAX))?;
        seq.push(n);
    }
    Ok(seq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    // ── Fibonacci ──────────────────────────────────────────────────────

    #[test]
    fn fibonacci_first_ten() {
        let seq: Vec<u64> = fibonacci(10).iter().map(|x| x.to_u64().unwrap()).collect();
        assert_eq!(seq, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[test]
    fn fibonacci_short_lengths_return_seed() {
        for len in [0, 1, 2] {
            assert_eq!(fibonacci(len), vec![Integer::from(0), Integer::from(1)]);
        }
    }

    #[test]
    fn fibonacci_beyond_u64() {
        // F(100) = 354224848179261915075
        let seq = fibonacci(101);
        assert_eq!(seq[100].to_string(), "354224848179261915075");
    }

    #[test]
    fn summary_matches_materialized_sequence() {
        let full = fibonacci(50);
        let (head, summary) = summarize_fibonacci(50, 10);
        assert_eq!(head, vec![0, 1, 1, 2, 3, 5, 8, 13, 21, 34]);
        assert_eq!(summary.sequence_length, 50);
        assert_eq!(summary.last_number, full[49].to_string());
        let evens = full.iter().filter(|x| x.is_even()).count();
        assert_eq!(summary.even_count, evens);
        assert_eq!(summary.odd_count, 50 - evens);
        // Every third Fibonacci number is even: F(0), F(3), ..., F(48)
        assert_eq!(evens, 17);
        let phi = (1.0 + 5f64.sqrt()) / 2.0;
        assert!((summary.golden_ratio_approximation - phi).abs() < 1e-12);
    }

    #[test]
    fn summary_of_seed_has_no_ratio() {
        let (head, summary) = summarize_fibonacci(1, 10);
        assert_eq!(head, vec![0, 1]);
        assert_eq!(summary.sequence_length, 2);
        assert_eq!(summary.golden_ratio_approximation, 0.0);
    }

    // ── Pascal ─────────────────────────────────────────────────────────

    #[test]
    fn pascal_five_rows() {
        let t = pascal_triangle(5).unwrap();
        assert_eq!(t.len(), 5);
        assert_eq!(t[0], vec![1]);
        assert_eq!(t[1], vec![1, 1]);
        assert_eq!(t[4], vec![1, 4, 6, 4, 1]);
        for (i, row) in t.iter().enumerate() {
            assert_eq!(row.len(), i + 1);
        }
    }

    #[test]
    fn pascal_row_sums_are_powers_of_two() {
        let t = pascal_triangle(20).unwrap();
        for (i, row) in t.iter().enumerate() {
            assert_eq!(row.iter().sum::<u64>(), 1u64 << i);
        }
    }

    #[test]
    fn pascal_zero_rows() {
        assert!(pascal_triangle(0).unwrap().is_empty());
    }

    #[test]
    fn pascal_largest_fitting_triangle() {
        let t = pascal_triangle(MAX_PASCAL_ROWS).unwrap();
        assert_eq!(t[67][33], 14_226_520_737_620_288_370);
        let err = pascal_triangle(MAX_PASCAL_ROWS + 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputationOverflow);
    }

    // ── Collatz ────────────────────────────────────────────────────────

    #[test]
    fn collatz_27_reference_length() {
        let t = collatz_trajectory(27, 1_000_000, 10).unwrap();
        assert_eq!(t.start, 27);
        assert_eq!(t.length, 112);
        assert_eq!(t.sequence, vec![27, 82, 41, 124, 62, 31, 94, 47, 142, 71]);

        let full = collatz_sequence(27, 1_000_000).unwrap();
        assert_eq!(full.len(), 112);
        assert_eq!(full.last(), Some(&1));
        assert_eq!(full.iter().max(), Some(&9232));
    }

    #[test]
    fn collatz_from_one() {
        let t = collatz_trajectory(1, 10, 10).unwrap();
        assert_eq!(t.length, 1);
        assert_eq!(t.sequence, vec![1]);
    }

    #[test]
    fn collatz_rejects_non_positive_start() {
        for start in [0, -1, -27] {
            let err = collatz_trajectory(start, 100, 10).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert_eq!(
                collatz_sequence(start, 100).unwrap_err().kind(),
                ErrorKind::InvalidInput
            );
        }
    }

    #[test]
    fn collatz_step_limit_aborts() {
        let err = collatz_trajectory(27, 50, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputationOverflow);
    }

    #[test]
    fn collatz_value_overflow_aborts() {
        // i64::MAX is odd and 3 * i64::MAX + 1 exceeds u64::MAX
        let err = collatz_trajectory(i64::MAX, usize::MAX, 10).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputationOverflow);
        assert_eq!(collatz_step(u64::MAX), None);
    }
}
