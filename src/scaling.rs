//! # Scaling — Difficulty to Concrete Bounds
//!
//! Translates a request's difficulty into the bound a kernel runs under. Each
//! work type has one [`ScaleRule`]: `limit = difficulty × multiplier`, then a
//! cap policy.
//!
//! | Work type | × | Cap |
//! |---|---|---|
//! | prime-pattern-discovery | 100 | reject above `max_sieve_bound` |
//! | goldbach-conjecture | 1000 | reject above `max_sieve_bound` |
//! | twin-primes | 1000 | reject above `max_sieve_bound` |
//! | number-theory | 100 | reject above `max_sieve_bound` |
//! | fibonacci-patterns | 50 | reject above `max_fibonacci_terms` |
//! | pascal-triangle | 10 | clamp to `max_pascal_rows` |
//! | collatz-conjecture | 100 | none |
//! | perfect-numbers | 1000 | none |
//! | mersenne-primes, riemann-zeros, optimization-algorithms | 100 | none |
//! | machine-learning | 1000 | none |
//! | birch-swinnerton, lattice-cryptography, distributed-systems | 10 | none |
//! | differential-equations | 5 | none |
//! | quantum-computing | 2 | none |
//! | everything else | 1 | none |
//!
//! Difficulty below 1 is rejected before any rule applies, for every work
//! type including unrecognized ones. The scaler never silently shrinks a
//! bound it was told to reject; clamping is reserved for Pascal rows.

use serde::Serialize;

use crate::config::Limits;
use crate::error::ComputeError;
use crate::work_type::WorkType;

/// What happens when `difficulty × multiplier` passes the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Unbounded,
    Clamp(u64),
    Reject(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleRule {
    pub multiplier: u64,
    pub cap: Cap,
    /// Name of the scaled quantity, used in overflow messages.
    pub what: &'static str,
}

/// A validated difficulty and the bound derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Scaled {
    pub difficulty: u64,
    pub limit: u64,
    /// True when a clamp cap lowered the bound.
    pub clamped: bool,
}

/// Reject difficulty < 1.
pub fn validate_difficulty(difficulty: i64) -> Result<u64, ComputeError> {
    if difficulty < 1 {
        return Err(ComputeError::invalid(format!(
            "difficulty must be at least 1, got {}",
            difficulty
        )));
    }
    Ok(difficulty as u64)
}

/// The scaling rule for one work type under the given limits.
pub fn rule_for(work_type: WorkType, limits: &Limits) -> ScaleRule {
    use WorkType::*;
    let (multiplier, cap, what) = match work_type {
        PrimePatternDiscovery => (100, Cap::Reject(limits.max_sieve_bound), "sieve bound"),
        GoldbachConjecture => (1000, Cap::Reject(limits.max_sieve_bound), "goldbach target"),
        TwinPrimes => (1000, Cap::Reject(limits.max_sieve_bound), "sieve bound"),
        NumberTheory => (100, Cap::Reject(limits.max_sieve_bound), "sieve bound"),
        FibonacciPatterns => (
            50,
            Cap::Reject(limits.max_fibonacci_terms),
            "fibonacci length",
        ),
        PascalTriangle => (10, Cap::Clamp(limits.max_pascal_rows), "pascal rows"),
        CollatzConjecture => (100, Cap::Unbounded, "collatz start"),
        PerfectNumbers => (1000, Cap::Unbounded, "search bound"),
        MersennePrimes => (100, Cap::Unbounded, "search bound"),
        RiemannZeros => (100, Cap::Unbounded, "zero count"),
        BirchSwinnerton => (10, Cap::Unbounded, "curve count"),
        DifferentialEquations => (5, Cap::Unbounded, "equation count"),
        LatticeCryptography => (10, Cap::Unbounded, "lattice dimension"),
        QuantumComputing => (2, Cap::Unbounded, "qubit count"),
        MachineLearning => (1000, Cap::Unbounded, "sample count"),
        DistributedSystems => (10, Cap::Unbounded, "node count"),
        OptimizationAlgorithms => (100, Cap::Unbounded, "iteration count"),
        YangMillsTheory | NavierStokes | EllipticCurveCrypto | CryptographicHash
        | PoincareConjecture | AlgebraicTopology | EuclideanGeometry | BlockchainProtocols => {
            (1, Cap::Unbounded, "difficulty")
        }
    };
    ScaleRule {
        multiplier,
        cap,
        what,
    }
}

impl ScaleRule {
    /// Apply the rule to an already validated difficulty.
    pub fn apply(&self, difficulty: u64) -> Result<Scaled, ComputeError> {
        let raw = difficulty.checked_mul(self.multiplier).ok_or_else(|| {
            ComputeError::overflow(
                self.what,
                format!("{} x {}", difficulty, self.multiplier),
                u64::MAX,
            )
        })?;
        let (limit, clamped) = match self.cap {
            Cap::Unbounded => (raw, false),
            Cap::Clamp(max) => (raw.min(max), raw > max),
            Cap::Reject(max) if raw > max => {
                return Err(ComputeError::overflow(self.what, raw, max));
            }
            Cap::Reject(_) => (raw, false),
        };
        Ok(Scaled {
            difficulty,
            limit,
            clamped,
        })
    }
}

/// Validate `difficulty` and scale it for `work_type`.
pub fn scale(work_type: WorkType, difficulty: i64, limits: &Limits) -> Result<Scaled, ComputeError> {
    let d = validate_difficulty(difficulty)?;
    rule_for(work_type, limits).apply(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn non_positive_difficulty_rejected_for_every_type() {
        let limits = Limits::default();
        for w in WorkType::ALL {
            for d in [0, -1, i64::MIN] {
                let err = scale(w, d, &limits).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::InvalidInput, "{} at {}", w, d);
            }
        }
    }

    #[test]
    fn multipliers_match_table() {
        let limits = Limits::default();
        let expected = [
            (WorkType::PrimePatternDiscovery, 300),
            (WorkType::GoldbachConjecture, 3000),
            (WorkType::TwinPrimes, 3000),
            (WorkType::NumberTheory, 300),
            (WorkType::CollatzConjecture, 300),
            (WorkType::PerfectNumbers, 3000),
            (WorkType::MersennePrimes, 300),
            (WorkType::FibonacciPatterns, 150),
            (WorkType::PascalTriangle, 20),
            (WorkType::RiemannZeros, 300),
            (WorkType::DifferentialEquations, 15),
            (WorkType::QuantumComputing, 6),
            (WorkType::MachineLearning, 3000),
            (WorkType::YangMillsTheory, 3),
        ];
        for (w, limit) in expected {
            assert_eq!(scale(w, 3, &limits).unwrap().limit, limit, "{}", w);
        }
    }

    #[test]
    fn pascal_rows_clamp() {
        let limits = Limits::default();
        let s = scale(WorkType::PascalTriangle, 1, &limits).unwrap();
        assert_eq!((s.limit, s.clamped), (10, false));
        let s = scale(WorkType::PascalTriangle, 50, &limits).unwrap();
        assert_eq!((s.limit, s.clamped), (20, true));
    }

    #[test]
    fn sieve_bound_rejects_above_limit() {
        let limits = Limits::default();
        // 10_000 × 1000 = 10M is exactly the bound
        assert_eq!(
            scale(WorkType::GoldbachConjecture, 10_000, &limits).unwrap().limit,
            10_000_000
        );
        let err = scale(WorkType::GoldbachConjecture, 10_001, &limits).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputationOverflow);
        let err = scale(WorkType::PrimePatternDiscovery, 1_000_000, &limits).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputationOverflow);
    }

    #[test]
    fn fibonacci_length_rejects_above_limit() {
        let limits = Limits::default();
        assert!(scale(WorkType::FibonacciPatterns, 400, &limits).is_ok());
        let err = scale(WorkType::FibonacciPatterns, 401, &limits).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputationOverflow);
    }

    #[test]
    fn multiplication_overflow_is_reported() {
        let limits = Limits::default();
        let err = scale(WorkType::MachineLearning, i64::MAX, &limits).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ComputationOverflow);
        // Multiplier 1 cannot overflow
        assert_eq!(
            scale(WorkType::CryptographicHash, i64::MAX, &limits).unwrap().limit,
            i64::MAX as u64
        );
    }

    #[test]
    fn custom_limits_are_honoured() {
        let limits = Limits {
            max_sieve_bound: 1000,
            ..Limits::default()
        };
        assert!(scale(WorkType::TwinPrimes, 1, &limits).is_ok());
        assert!(scale(WorkType::TwinPrimes, 2, &limits).is_err());
    }
}
