//! # Patterns — Gap Statistics over Prime Sequences
//!
//! Consumes an ascending prime list and summarises the differences between
//! consecutive primes. Statistics are always computed over every gap; callers
//! that only display a prefix use [`GapStatistics::leading_gaps`] afterwards,
//! so the average, max and min never depend on the display cut.

use serde::Serialize;
use std::collections::BTreeMap;

/// Consecutive-prime differences and their summary.
///
/// For `k ≥ 2` primes, `gaps.len() == k - 1`. With fewer than two primes the
/// statistics are degenerate: no gaps, and zero for every summary value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapStatistics {
    pub gaps: Vec<u64>,
    pub average_gap: f64,
    pub max_gap: u64,
    pub min_gap: u64,
}

impl GapStatistics {
    fn degenerate() -> Self {
        GapStatistics {
            gaps: Vec::new(),
            average_gap: 0.0,
            max_gap: 0,
            min_gap: 0,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.gaps.is_empty()
    }

    /// First `k` gaps, for presentation.
    pub fn leading_gaps(&self, k: usize) -> &[u64] {
        &self.gaps[..k.min(self.gaps.len())]
    }

    /// How often each gap size occurs, keyed by gap size.
    pub fn gap_histogram(&self) -> BTreeMap<u64, usize> {
        let mut hist = BTreeMap::new();
        for &g in &self.gaps {
            *hist.entry(g).or_insert(0) += 1;
        }
        hist
    }
}

/// Compute gap statistics for an ascending prime sequence.
pub fn analyze(primes: &[u64]) -> GapStatistics {
    if primes.len() < 2 {
        return GapStatistics::degenerate();
    }

    let gaps: Vec<u64> = primes.windows(2).map(|w| w[1] - w[0]).collect();
    let sum: u64 = gaps.iter().sum();
    let max_gap = gaps.iter().copied().max().unwrap_or(0);
    let min_gap = gaps.iter().copied().min().unwrap_or(0);

    GapStatistics {
        average_gap: sum as f64 / gaps.len() as f64,
        max_gap,
        min_gap,
        gaps,
    }
}
