//! # Sieve — Prime Generation and Primality by Trial Division
//!
//! Leaf dependency of every prime-based work type. Provides:
//!
//! 1. **Prime generation** via a boolean-marking sieve of Eratosthenes over a
//!    packed bit array ([`BitSieve`], one bit per integer).
//! 2. **Single-integer primality** by trial division, for callers that need
//!    one answer rather than a whole table.
//! 3. **Membership sets** built from a generated prime list, for O(1) lookups
//!    in the Goldbach search.
//!
//! ## Algorithm: Sieve of Eratosthenes
//!
//! Start with every integer in `[2, n]` marked. For each still-marked `p` with
//! `p ≤ ⌊√n⌋`, strike `p², p² + p, …`. What remains marked is prime.
//! Complexity: O(n log log n) time, O(n/8) bytes.
//!
//! The sieve allocates proportionally to `n`. It never bounds `n` itself;
//! `scaling` rejects bounds above the configured `max_sieve_bound`.
//!
//! ## References
//!
//! - Eratosthenes of Cyrene, ~240 BCE.
//! - OEIS A000720: pi(n), the prime counting function.

use std::collections::HashSet;

/// Default upper bound accepted by the scaler for sieve-backed work types.
pub const SIEVE_LIMIT: u64 = 10_000_000;

/// Generate all primes in `[2, limit]`, ascending.
///
/// Returns an empty vector for `limit < 2`. Every call allocates a fresh
/// table; nothing is cached between calls.
pub fn generate_primes(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return vec![];
    }

    let len = limit as usize + 1;
    let mut marks = BitSieve::new_all_set(len);
    marks.clear(0);
    marks.clear(1);

    let root = isqrt(limit) as usize;
    for p in 2..=root {
        if !marks.get(p) {
            continue; // already struck by a smaller prime
        }
        let mut m = p * p;
        while m < len {
            marks.clear(m);
            m += p;
        }
    }

    let mut primes = Vec::with_capacity(estimate_prime_count(limit));
    primes.extend(marks.iter_set_bits().map(|i| i as u64));
    primes
}

/// Decide primality of a single integer by trial division up to `⌊√n⌋`.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let root = isqrt(n);
    let mut d = 3;
    while d <= root {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Hash set over a prime list for constant-time membership tests.
pub fn prime_set(primes: &[u64]) -> HashSet<u64> {
    primes.iter().copied().collect()
}

/// Integer square root: largest `r` with `r² ≤ n`.
pub fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut r = (n as f64).sqrt() as u64;
    // f64 rounding can land one off in either direction for large n
    while r.checked_mul(r).map_or(true, |sq| sq > n) {
        r -= 1;
    }
    while (r + 1).checked_mul(r + 1).is_some_and(|sq| sq <= n) {
        r += 1;
    }
    r
}

/// Capacity hint from the prime number theorem, padded so the vector rarely regrows.
fn estimate_prime_count(n: u64) -> usize {
    if n < 10 {
        return 4;
    }
    let nf = n as f64;
    (1.3 * nf / nf.ln()) as usize
}

/// Packed bit array backing the sieve.
///
/// 8× memory reduction over `Vec<bool>`: the default 10M bound needs 1.25 MB.
/// Bit `i` lives in word `i / 64` at position `i % 64`. A set bit means the
/// integer `i` is still a prime candidate.
pub struct BitSieve {
    words: Vec<u64>,
    len: usize,
}

impl BitSieve {
    /// Create a sieve of `len` bits, all set.
    pub fn new_all_set(len: usize) -> Self {
        let num_words = len.div_ceil(64);
        let mut words = vec![u64::MAX; num_words];
        // Clear unused high bits in the last word
        let extra = num_words * 64 - len;
        if extra > 0 && num_words > 0 {
            words[num_words - 1] >>= extra;
        }
        BitSieve { words, len }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get bit `index`.
    ///
    /// # Panics
    /// Panics if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(
            index < self.len,
            "BitSieve index out of bounds: {} >= {}",
            index,
            self.len
        );
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }

    /// Clear bit `index` (integer struck as composite).
    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < self.len);
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Count set bits using hardware POPCNT.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Iterate over the indices of all set bits in ascending order.
    pub fn iter_set_bits(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &word)| {
            let base = wi * 64;
            BitIter { word, base }
        })
    }
}

/// Iterator over set bits within a single u64 word.
struct BitIter {
    word: u64,
    base: usize,
}

impl Iterator for BitIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.word == 0 {
            return None;
        }
        let tz = self.word.trailing_zeros() as usize;
        self.word &= self.word - 1; // clear lowest set bit
        Some(self.base + tz)
    }
}

#[cfg(test)]
mod tests {
    //! # Sieve Tests
    //!
    //! - **Prime generation** (`generate_primes`): exact lists for small limits
    //!   and pi(x) counts (OEIS A000720): pi(100)=25, pi(1000)=168,
    //!   pi(10000)=1229, pi(100000)=9592.
    //! - **Trial division** (`is_prime`): agreement with the sieve.
    //! - **Integer square root** (`isqrt`): exact at perfect squares and their
    //!   neighbours, including the top of the u64 range.
    //! - **BitSieve**: word-boundary behaviour and popcount consistency.

    use super::*;

    // ── Prime Generation ───────────────────────────────────────────────

    #[test]
    fn test_generate_primes() {
        let primes = generate_primes(30);
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    /// Limits 0 and 1 produce nothing; 10 sits strictly between 7 and 11,
    /// checking the inclusive upper bound.
    #[test]
    fn test_generate_primes_small_limits() {
        assert_eq!(generate_primes(0), Vec::<u64>::new());
        assert_eq!(generate_primes(1), Vec::<u64>::new());
        assert_eq!(generate_primes(2), vec![2]);
        assert_eq!(generate_primes(3), vec![2, 3]);
        assert_eq!(generate_primes(4), vec![2, 3]);
        assert_eq!(generate_primes(5), vec![2, 3, 5]);
        assert_eq!(generate_primes(7), vec![2, 3, 5, 7]);
        assert_eq!(generate_primes(10), vec![2, 3, 5, 7]);
        assert_eq!(generate_primes(11), vec![2, 3, 5, 7, 11]);
    }

    #[test]
    fn test_generate_primes_known_count() {
        assert_eq!(generate_primes(100).len(), 25);
        assert_eq!(generate_primes(1000).len(), 168);
        assert_eq!(generate_primes(10000).len(), 1229);
        assert_eq!(generate_primes(100000).len(), 9592);
    }

    /// Bounds at perfect squares: 49 = 7² must be struck, and 121 = 11²
    /// must be struck even though 11 is exactly ⌊√121⌋.
    #[test]
    fn test_generate_primes_square_bounds() {
        assert!(!generate_primes(49).contains(&49));
        assert_eq!(generate_primes(49).last(), Some(&47));
        assert!(!generate_primes(121).contains(&121));
        assert_eq!(generate_primes(121).last(), Some(&113));
    }

    #[test]
    fn test_generate_primes_word_boundary() {
        // 61 is prime and lands in word 0; 67 lands in word 1
        let p = generate_primes(70);
        assert!(p.contains(&61));
        assert!(p.contains(&67));
        assert_eq!(p.len(), 19);
    }

    // ── Trial Division ─────────────────────────────────────────────────

    #[test]
    fn is_prime_small_values() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(97));
        assert!(!is_prime(91)); // 7 * 13
        assert!(!is_prime(121)); // 11²
    }

    #[test]
    fn is_prime_matches_sieve_to_10000() {
        let primes = prime_set(&generate_primes(10_000));
        for n in 0..=10_000u64 {
            assert_eq!(is_prime(n), primes.contains(&n), "disagreement at {}", n);
        }
    }

    #[test]
    fn is_prime_large_known_values() {
        assert!(is_prime(1_000_000_007));
        assert!(is_prime(2_147_483_647)); // M31
        assert!(!is_prime(1_000_000_007 * 3));
    }

    // ── Integer Square Root ────────────────────────────────────────────

    #[test]
    fn isqrt_exact_and_neighbours() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(3), 1);
        assert_eq!(isqrt(4), 2);
        assert_eq!(isqrt(99), 9);
        assert_eq!(isqrt(100), 10);
        assert_eq!(isqrt(101), 10);
        assert_eq!(isqrt(u64::MAX), 4_294_967_295);
        let big = 4_294_967_295u64 * 4_294_967_295;
        assert_eq!(isqrt(big), 4_294_967_295);
        assert_eq!(isqrt(big - 1), 4_294_967_294);
    }

    // ── BitSieve ───────────────────────────────────────────────────────

    #[test]
    fn bitsieve_new_all_set() {
        let bs = BitSieve::new_all_set(100);
        assert_eq!(bs.len(), 100);
        assert_eq!(bs.count_ones(), 100);
        assert!(bs.get(0));
        assert!(bs.get(99));
    }

    #[test]
    fn bitsieve_word_boundary() {
        let mut bs = BitSieve::new_all_set(130);
        bs.clear(63);
        bs.clear(64);
        bs.clear(127);
        bs.clear(128);
        assert!(!bs.get(63));
        assert!(!bs.get(64));
        assert!(bs.get(65));
        assert!(!bs.get(127));
        assert!(!bs.get(128));
        assert!(bs.get(129));
        assert_eq!(bs.count_ones(), 126);
    }

    #[test]
    fn bitsieve_non_multiple_of_64() {
        // Extra bits in the last word must be clear so iteration stops at len
        let bs = BitSieve::new_all_set(70);
        assert_eq!(bs.count_ones(), 70);
        assert_eq!(bs.iter_set_bits().last(), Some(69));
    }

    #[test]
    fn bitsieve_empty() {
        let bs = BitSieve::new_all_set(0);
        assert!(bs.is_empty());
        assert_eq!(bs.count_ones(), 0);
        assert_eq!(bs.iter_set_bits().count(), 0);
    }

    #[test]
    fn bitsieve_iter_set_bits_matches_count() {
        let mut bs = BitSieve::new_all_set(1000);
        for i in (0..1000).step_by(3) {
            bs.clear(i);
        }
        assert_eq!(bs.iter_set_bits().count(), bs.count_ones());
    }
}
