//! # Search — Goldbach Pairs, Twin Primes, Perfect/Mersenne Membership
//!
//! Kernels that apply a search or verification rule to the sieve's output.
//!
//! - **Goldbach**: walk primes `p ≤ n/2` in ascending order and test `n − p`
//!   against a hash set. The pair count covers the whole walk; only the
//!   returned list is cut to the display cap.
//! - **Twin primes**: adjacent entries of the prime list that differ by 2.
//!   The scan stops after a fixed number of pairs, bounding work independently
//!   of the sieve limit.
//! - **Perfect / Mersenne**: filter fixed reference lists by an upper bound.
//!   Nothing is derived; Lucas–Lehmer testing is out of scope.

use serde::Serialize;

use crate::error::ComputeError;
use crate::sieve;

/// The first five perfect numbers, 2^(p−1)·(2^p − 1) for p = 2, 3, 5, 7, 13.
pub const KNOWN_PERFECT_NUMBERS: [u64; 5] = [6, 28, 496, 8128, 33_550_336];

/// Mersenne primes 2^p − 1 for p = 2, 3, 5, 7, 13, 17, 19.
pub const KNOWN_MERSENNE_PRIMES: [u64; 7] = [3, 7, 31, 127, 8191, 131_071, 524_287];

// ── Goldbach ────────────────────────────────────────────────────

/// Outcome of a Goldbach pair search for one even number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldbachSearch {
    pub even_number: u64,
    /// Pairs `(p, n − p)` with `p ≤ n − p`, ascending in `p`, cut to the cap.
    pub pairs: Vec<(u64, u64)>,
    /// Number of pairs over the full search, before the cut.
    pub total_pairs: usize,
}

impl GoldbachSearch {
    /// Whether the conjecture held for this number.
    pub fn verified(&self) -> bool {
        self.total_pairs > 0
    }
}

/// Find Goldbach pairs for even `n` using `primes`, which must hold every
/// prime up to `n` in ascending order.
///
/// Odd `n` and `n < 4` are outside the conjecture's domain and return
/// `InvalidInput`.
pub fn goldbach_pairs(n: u64, primes: &[u64], cap: usize) -> Result<GoldbachSearch, ComputeError> {
    if n < 4 || n % 2 != 0 {
        return Err(ComputeError::invalid(format!(
            "goldbach target must be an even number >= 4, got {}",
            n
        )));
    }

    let members = sieve::prime_set(primes);
    let half = n / 2;
    let mut pairs = Vec::with_capacity(cap);
    let mut total_pairs = 0;

    for &p in primes {
        if p > half {
            break;
        }
        if members.contains(&(n - p)) {
            total_pairs += 1;
            if pairs.len() < cap {
                pairs.push((p, n - p));
            }
        }
    }

    Ok(GoldbachSearch {
        even_number: n,
        pairs,
        total_pairs,
    })
}

// ── Twin Primes ─────────────────────────────────────────────────

/// Outcome of a bounded twin-prime scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TwinScan {
    pub pairs: Vec<(u64, u64)>,
    /// True when the scan stopped at its pair limit rather than the end of
    /// the prime list, so more pairs may exist below the bound.
    pub capped: bool,
}

/// Scan an ascending prime list for `(p, p + 2)` neighbours, stopping once
/// `max_pairs` have been collected.
pub fn twin_primes(primes: &[u64], max_pairs: usize) -> TwinScan {
    let mut pairs = Vec::new();
    if max_pairs == 0 {
        return TwinScan {
            pairs,
            capped: primes.len() > 1,
        };
    }
    for w in primes.windows(2) {
        if w[1] - w[0] == 2 {
            pairs.push((w[0], w[1]));
            if pairs.len() >= max_pairs {
                return TwinScan {
                    pairs,
                    capped: true,
                };
            }
        }
    }
    TwinScan {
        pairs,
        capped: false,
    }
}

// ── Perfect / Mersenne ──────────────────────────────────────────

/// Known perfect numbers not exceeding `bound`.
pub fn perfect_numbers_up_to(bound: u64) -> Vec<u64> {
    KNOWN_PERFECT_NUMBERS
        .iter()
        .copied()
        .filter(|&p| p <= bound)
        .collect()
}

/// Known Mersenne primes not exceeding `bound`.
pub fn mersenne_primes_up_to(bound: u64) -> Vec<u64> {
    KNOWN_MERSENNE_PRIMES
        .iter()
        .copied()
        .filter(|&m| m <= bound)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::sieve::{generate_primes, is_prime};

    // ── Goldbach ───────────────────────────────────────────────────────

    #[test]
    fn goldbach_ten() {
        let primes = generate_primes(10);
        let g = goldbach_pairs(10, &primes, 5).unwrap();
        assert_eq!(g.pairs, vec![(3, 7), (5, 5)]);
        assert_eq!(g.total_pairs, 2);
        assert!(g.verified());
    }

    #[test]
    fn goldbach_four_uses_two() {
        let g = goldbach_pairs(4, &generate_primes(4), 5).unwrap();
        assert_eq!(g.pairs, vec![(2, 2)]);
    }

    #[test]
    fn goldbach_count_is_not_truncated() {
        // 1000 has 28 Goldbach partitions
        let g = goldbach_pairs(1000, &generate_primes(1000), 5).unwrap();
        assert_eq!(g.pairs.len(), 5);
        assert_eq!(g.total_pairs, 28);
        assert_eq!(g.pairs[0], (3, 997));
        for w in g.pairs.windows(2) {
            assert!(w[0].0 < w[1].0);
        }
    }

    #[test]
    fn goldbach_pairs_are_prime_and_ordered() {
        let primes = generate_primes(2000);
        for n in (4..=2000u64).step_by(2) {
            let g = goldbach_pairs(n, &primes, usize::MAX).unwrap();
            assert!(g.verified(), "no Goldbach pair for {}", n);
            for &(p, q) in &g.pairs {
                assert!(p <= q);
                assert_eq!(p + q, n);
                assert!(is_prime(p) && is_prime(q));
            }
        }
    }

    #[test]
    fn goldbach_rejects_odd_and_small() {
        let primes = generate_primes(100);
        for n in [0, 2, 3, 9, 99] {
            let err = goldbach_pairs(n, &primes, 5).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
    }

    // ── Twin Primes ────────────────────────────────────────────────────

    #[test]
    fn twin_primes_up_to_50() {
        let scan = twin_primes(&generate_primes(50), 10);
        assert_eq!(
            scan.pairs,
            vec![(3, 5), (5, 7), (11, 13), (17, 19), (29, 31), (41, 43)]
        );
        assert!(!scan.capped);
    }

    #[test]
    fn twin_scan_stops_at_cap() {
        let scan = twin_primes(&generate_primes(10_000), 10);
        assert_eq!(scan.pairs.len(), 10);
        assert!(scan.capped);
        assert_eq!(scan.pairs.last(), Some(&(107, 109)));
    }

    #[test]
    fn twin_scan_empty_inputs() {
        assert!(twin_primes(&[], 10).pairs.is_empty());
        assert!(twin_primes(&[2], 10).pairs.is_empty());
        assert!(twin_primes(&generate_primes(50), 0).pairs.is_empty());
    }

    // ── Perfect / Mersenne ─────────────────────────────────────────────

    #[test]
    fn perfect_membership_by_bound() {
        assert!(perfect_numbers_up_to(5).is_empty());
        assert_eq!(perfect_numbers_up_to(1000), vec![6, 28, 496]);
        assert_eq!(perfect_numbers_up_to(8128), vec![6, 28, 496, 8128]);
        assert_eq!(perfect_numbers_up_to(u64::MAX).len(), 5);
    }

    #[test]
    fn mersenne_membership_by_bound() {
        assert_eq!(mersenne_primes_up_to(100), vec![3, 7, 31]);
        assert_eq!(mersenne_primes_up_to(8191), vec![3, 7, 31, 127, 8191]);
        assert_eq!(mersenne_primes_up_to(u64::MAX).len(), 7);
    }

    #[test]
    fn reference_lists_are_consistent() {
        for &m in &KNOWN_MERSENNE_PRIMES {
            assert!(is_prime(m));
            assert!((m + 1).is_power_of_two());
        }
        // Each perfect number is 2^(p-1) * M_p for the first five Mersenne primes
        for (&perfect, &m) in KNOWN_PERFECT_NUMBERS.iter().zip(KNOWN_MERSENNE_PRIMES.iter()) {
            assert_eq!(perfect, m * (m + 1) / 2);
        }
    }
}
