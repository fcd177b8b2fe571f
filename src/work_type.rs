//! # WorkType — The Closed Catalog of Computation Kinds
//!
//! Every kind of work the engine understands is a variant of [`WorkType`].
//! Request strings are parsed into [`WorkTypeKey`], which keeps anything the
//! catalog does not know as an explicit `Unrecognized` value so the registry's
//! fallback path is a visible case rather than a missing map entry.
//!
//! Catalog indices (`index`) are stable and match the numbering exposed by the
//! engine's `/api/engines` listing.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WorkType {
    #[serde(rename = "riemann-zeros")]
    RiemannZeros,
    #[serde(rename = "goldbach-conjecture")]
    GoldbachConjecture,
    #[serde(rename = "birch-swinnerton")]
    BirchSwinnerton,
    #[serde(rename = "prime-pattern-discovery")]
    PrimePatternDiscovery,
    #[serde(rename = "twin-primes")]
    TwinPrimes,
    #[serde(rename = "collatz-conjecture")]
    CollatzConjecture,
    #[serde(rename = "perfect-numbers")]
    PerfectNumbers,
    #[serde(rename = "mersenne-primes")]
    MersennePrimes,
    #[serde(rename = "fibonacci-patterns")]
    FibonacciPatterns,
    #[serde(rename = "pascal-triangle")]
    PascalTriangle,
    #[serde(rename = "differential-equations")]
    DifferentialEquations,
    #[serde(rename = "number-theory")]
    NumberTheory,
    #[serde(rename = "yang-mills-theory")]
    YangMillsTheory,
    #[serde(rename = "navier-stokes")]
    NavierStokes,
    #[serde(rename = "elliptic-curve-crypto")]
    EllipticCurveCrypto,
    #[serde(rename = "lattice-cryptography")]
    LatticeCryptography,
    #[serde(rename = "cryptographic-hash")]
    CryptographicHash,
    #[serde(rename = "poincaré-conjecture")]
    PoincareConjecture,
    #[serde(rename = "algebraic-topology")]
    AlgebraicTopology,
    #[serde(rename = "euclidean-geometry")]
    EuclideanGeometry,
    #[serde(rename = "quantum-computing")]
    QuantumComputing,
    #[serde(rename = "machine-learning")]
    MachineLearning,
    #[serde(rename = "blockchain-protocols")]
    BlockchainProtocols,
    #[serde(rename = "distributed-systems")]
    DistributedSystems,
    #[serde(rename = "optimization-algorithms")]
    OptimizationAlgorithms,
}

/// Coarse difficulty class shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Complexity {
    Medium,
    High,
    Extreme,
    #[serde(rename = "Ultra-Extreme")]
    UltraExtreme,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Medium => "Medium",
            Complexity::High => "High",
            Complexity::Extreme => "Extreme",
            Complexity::UltraExtreme => "Ultra-Extreme",
        }
    }
}

/// Display metadata for one work type.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub complexity: Complexity,
    #[serde(rename = "workType")]
    pub index: u8,
    /// False for the randomized stand-ins whose output carries no
    /// mathematical guarantee.
    pub algorithmic: bool,
}

impl WorkType {
    /// Every work type, in catalog order.
    pub const ALL: [WorkType; 25] = [
        WorkType::RiemannZeros,
        WorkType::GoldbachConjecture,
        WorkType::BirchSwinnerton,
        WorkType::PrimePatternDiscovery,
        WorkType::TwinPrimes,
        WorkType::CollatzConjecture,
        WorkType::PerfectNumbers,
        WorkType::MersennePrimes,
        WorkType::FibonacciPatterns,
        WorkType::PascalTriangle,
        WorkType::DifferentialEquations,
        WorkType::NumberTheory,
        WorkType::YangMillsTheory,
        WorkType::NavierStokes,
        WorkType::EllipticCurveCrypto,
        WorkType::LatticeCryptography,
        WorkType::CryptographicHash,
        WorkType::PoincareConjecture,
        WorkType::AlgebraicTopology,
        WorkType::EuclideanGeometry,
        WorkType::QuantumComputing,
        WorkType::MachineLearning,
        WorkType::BlockchainProtocols,
        WorkType::DistributedSystems,
        WorkType::OptimizationAlgorithms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkType::RiemannZeros => "riemann-zeros",
            WorkType::GoldbachConjecture => "goldbach-conjecture",
            WorkType::BirchSwinnerton => "birch-swinnerton",
            WorkType::PrimePatternDiscovery => "prime-pattern-discovery",
            WorkType::TwinPrimes => "twin-primes",
            WorkType::CollatzConjecture => "collatz-conjecture",
            WorkType::PerfectNumbers => "perfect-numbers",
            WorkType::MersennePrimes => "mersenne-primes",
            WorkType::FibonacciPatterns => "fibonacci-patterns",
            WorkType::PascalTriangle => "pascal-triangle",
            WorkType::DifferentialEquations => "differential-equations",
            WorkType::NumberTheory => "number-theory",
            WorkType::YangMillsTheory => "yang-mills-theory",
            WorkType::NavierStokes => "navier-stokes",
            WorkType::EllipticCurveCrypto => "elliptic-curve-crypto",
            WorkType::LatticeCryptography => "lattice-cryptography",
            WorkType::CryptographicHash => "cryptographic-hash",
            WorkType::PoincareConjecture => "poincaré-conjecture",
            WorkType::AlgebraicTopology => "algebraic-topology",
            WorkType::EuclideanGeometry => "euclidean-geometry",
            WorkType::QuantumComputing => "quantum-computing",
            WorkType::MachineLearning => "machine-learning",
            WorkType::BlockchainProtocols => "blockchain-protocols",
            WorkType::DistributedSystems => "distributed-systems",
            WorkType::OptimizationAlgorithms => "optimization-algorithms",
        }
    }

    /// Catalog position, 0-based.
    pub fn index(&self) -> u8 {
        WorkType::ALL
            .iter()
            .position(|w| w == self)
            .map_or(u8::MAX, |i| i as u8)
    }

    /// Whether the handler is a deterministic mathematical kernel.
    pub fn is_algorithmic(&self) -> bool {
        matches!(
            self,
            WorkType::GoldbachConjecture
                | WorkType::PrimePatternDiscovery
                | WorkType::TwinPrimes
                | WorkType::CollatzConjecture
                | WorkType::PerfectNumbers
                | WorkType::MersennePrimes
                | WorkType::FibonacciPatterns
                | WorkType::PascalTriangle
                | WorkType::NumberTheory
        )
    }

    pub fn catalog_entry(&self) -> CatalogEntry {
        use Complexity::*;
        let (name, description, complexity) = match self {
            WorkType::RiemannZeros => (
                "Riemann Zeros",
                "Compute non-trivial zeros of the Riemann zeta function",
                UltraExtreme,
            ),
            WorkType::GoldbachConjecture => (
                "Goldbach Conjecture",
                "Verify Goldbach conjecture for large even numbers",
                Extreme,
            ),
            WorkType::BirchSwinnerton => (
                "Birch-Swinnerton",
                "Compute L-functions for elliptic curves",
                Extreme,
            ),
            WorkType::PrimePatternDiscovery => (
                "Prime Pattern Discovery",
                "Discover patterns in prime number distribution",
                High,
            ),
            WorkType::TwinPrimes => (
                "Twin Prime Conjecture",
                "Find twin prime pairs and verify the conjecture",
                Extreme,
            ),
            WorkType::CollatzConjecture => (
                "Collatz Conjecture",
                "Verify the Collatz conjecture for large numbers",
                High,
            ),
            WorkType::PerfectNumbers => (
                "Perfect Number Search",
                "Check known perfect numbers against a bound",
                Extreme,
            ),
            WorkType::MersennePrimes => (
                "Mersenne Prime Search",
                "Check known Mersenne primes against a bound",
                UltraExtreme,
            ),
            WorkType::FibonacciPatterns => (
                "Fibonacci Pattern Analysis",
                "Analyze patterns in Fibonacci sequences",
                Medium,
            ),
            WorkType::PascalTriangle => (
                "Pascal Triangle Research",
                "Research properties of Pascal's triangle",
                Medium,
            ),
            WorkType::DifferentialEquations => (
                "Differential Equations",
                "Solve complex differential equations",
                High,
            ),
            WorkType::NumberTheory => (
                "Number Theory",
                "Advanced number theory research",
                High,
            ),
            WorkType::YangMillsTheory => (
                "Yang-Mills Theory",
                "Solve Yang-Mills field equations for quantum chromodynamics",
                UltraExtreme,
            ),
            WorkType::NavierStokes => (
                "Navier-Stokes",
                "Solve Navier-Stokes equations for fluid dynamics",
                UltraExtreme,
            ),
            WorkType::EllipticCurveCrypto => (
                "Elliptic Curve Crypto",
                "Generate secure elliptic curve parameters",
                High,
            ),
            WorkType::LatticeCryptography => (
                "Lattice Cryptography",
                "Post-quantum cryptographic algorithms",
                UltraExtreme,
            ),
            WorkType::CryptographicHash => (
                "Cryptographic Hash",
                "Develop and analyze cryptographic hash functions",
                High,
            ),
            WorkType::PoincareConjecture => (
                "Poincaré Conjecture",
                "Topological manifold classification",
                UltraExtreme,
            ),
            WorkType::AlgebraicTopology => (
                "Algebraic Topology",
                "Research in algebraic topology and homotopy theory",
                UltraExtreme,
            ),
            WorkType::EuclideanGeometry => (
                "Euclidean Geometry",
                "Advanced Euclidean geometry research",
                High,
            ),
            WorkType::QuantumComputing => (
                "Quantum Computing",
                "Quantum algorithm development and optimization",
                UltraExtreme,
            ),
            WorkType::MachineLearning => (
                "Machine Learning",
                "Advanced machine learning algorithm research",
                High,
            ),
            WorkType::BlockchainProtocols => (
                "Blockchain Protocols",
                "Research and develop blockchain protocols",
                High,
            ),
            WorkType::DistributedSystems => (
                "Distributed Systems",
                "Research in distributed systems and algorithms",
                High,
            ),
            WorkType::OptimizationAlgorithms => (
                "Optimization Algorithms",
                "Develop and optimize mathematical algorithms",
                High,
            ),
        };
        CatalogEntry {
            id: self.as_str(),
            name,
            description,
            complexity,
            index: self.index(),
            algorithmic: self.is_algorithmic(),
        }
    }
}

impl std::fmt::Display for WorkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkType {
    type Err = String;

    /// Accepts the catalog key, plus snake_case spellings and the ASCII
    /// spelling `poincare-conjecture`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        let normalized = match normalized.as_str() {
            "poincare-conjecture" => "poincaré-conjecture",
            other => other,
        };
        WorkType::ALL
            .iter()
            .copied()
            .find(|w| w.as_str() == normalized)
            .ok_or_else(|| format!("unknown work type: {}", s))
    }
}

/// A parsed request key: either a catalog entry or a string the catalog does
/// not know. The unrecognized case is handled, not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkTypeKey {
    Known(WorkType),
    Unrecognized(String),
}

impl WorkTypeKey {
    pub fn parse(s: &str) -> Self {
        match s.parse::<WorkType>() {
            Ok(w) => WorkTypeKey::Known(w),
            Err(_) => WorkTypeKey::Unrecognized(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            WorkTypeKey::Known(w) => w.as_str(),
            WorkTypeKey::Unrecognized(s) => s,
        }
    }
}

impl std::fmt::Display for WorkTypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full catalog in index order.
pub fn catalog() -> Vec<CatalogEntry> {
    WorkType::ALL.iter().map(|w| w.catalog_entry()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_roundtrip_through_from_str() {
        for w in WorkType::ALL {
            assert_eq!(w.as_str().parse::<WorkType>(), Ok(w));
        }
    }

    #[test]
    fn serde_names_match_keys() {
        for w in WorkType::ALL {
            let json = serde_json::to_value(w).unwrap();
            assert_eq!(json, serde_json::json!(w.as_str()));
        }
    }

    #[test]
    fn indices_follow_catalog_order() {
        for (i, w) in WorkType::ALL.iter().enumerate() {
            assert_eq!(w.index() as usize, i);
        }
        assert_eq!(WorkType::PrimePatternDiscovery.index(), 3);
        assert_eq!(WorkType::OptimizationAlgorithms.index(), 24);
    }

    #[test]
    fn alternate_spellings_parse() {
        assert_eq!(
            "prime_pattern_discovery".parse::<WorkType>(),
            Ok(WorkType::PrimePatternDiscovery)
        );
        assert_eq!(
            "poincare-conjecture".parse::<WorkType>(),
            Ok(WorkType::PoincareConjecture)
        );
        assert_eq!(" Twin-Primes ".parse::<WorkType>(), Ok(WorkType::TwinPrimes));
    }

    #[test]
    fn unknown_key_is_unrecognized() {
        assert_eq!(
            WorkTypeKey::parse("nonexistent-type"),
            WorkTypeKey::Unrecognized("nonexistent-type".into())
        );
        assert_eq!(
            WorkTypeKey::parse("goldbach-conjecture"),
            WorkTypeKey::Known(WorkType::GoldbachConjecture)
        );
    }

    #[test]
    fn catalog_has_every_type_once() {
        let entries = catalog();
        assert_eq!(entries.len(), 25);
        let mut ids: Vec<_> = entries.iter().map(|e| e.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 25);
        assert_eq!(entries.iter().filter(|e| e.algorithmic).count(), 9);
    }

    #[test]
    fn catalog_entry_serializes_index_as_work_type() {
        let v = serde_json::to_value(WorkType::TwinPrimes.catalog_entry()).unwrap();
        assert_eq!(v["workType"], 4);
        assert_eq!(v["complexity"], "Extreme");
        assert_eq!(v["id"], "twin-primes");
    }
}
