//! # Illustrative — Randomized Stand-ins for Open Problems
//!
//! Sixteen work types name problems no bounded computation can answer
//! (Yang–Mills, Navier–Stokes, Poincaré classification, ...). Their handlers
//! produce plausibly shaped payloads from a random source and carry
//! `"simulated": true` so no consumer mistakes them for results.
//!
//! Every generator takes `&mut dyn RngCore`; nothing here reaches for thread
//! or OS randomness. [`seeded_rng`] derives the generator the registry uses
//! from `(seed, work_type, difficulty)` with SHA-256, so the same request and
//! seed always reproduce the same payload.
//!
//! `riemann-zeros` needs no randomness: it lists points on the critical line
//! at a fixed spacing starting from the first zero's ordinate. They are not
//! zeros of ζ beyond the first.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rug::integer::Order;
use rug::Integer;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

use crate::scaling::Scaled;
use crate::work_type::WorkType;

/// Imaginary part of the first non-trivial zero of ζ(s).
const FIRST_ZERO_ORDINATE: f64 = 14.134725;

/// Payload fragment produced by one illustrative handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Illustration {
    pub proof: String,
    pub body: Map<String, Value>,
}

impl Illustration {
    fn new(proof: String, body: Value) -> Self {
        let mut body = match body {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".into(), other);
                map
            }
        };
        body.insert("simulated".into(), Value::Bool(true));
        Illustration { proof, body }
    }
}

/// Deterministic generator for one request.
pub fn seeded_rng(seed: u64, work_type: &str, difficulty: u64) -> StdRng {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(work_type.as_bytes());
    hasher.update(difficulty.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&digest);
    StdRng::from_seed(bytes)
}

/// Run the illustrative generator for `work_type`. Returns `None` for the
/// algorithmic work types, which have real kernels instead.
pub fn generate(work_type: WorkType, scaled: &Scaled, rng: &mut dyn RngCore) -> Option<Illustration> {
    use WorkType::*;
    let ill = match work_type {
        RiemannZeros => riemann_zeros(scaled),
        BirchSwinnerton => birch_swinnerton(scaled, rng),
        DifferentialEquations => differential_equations(scaled, rng),
        YangMillsTheory => yang_mills(rng),
        NavierStokes => navier_stokes(rng),
        EllipticCurveCrypto => elliptic_curve_crypto(rng),
        LatticeCryptography => lattice_cryptography(scaled, rng),
        CryptographicHash => cryptographic_hash(rng),
        PoincareConjecture => poincare_conjecture(rng),
        AlgebraicTopology => algebraic_topology(scaled, rng),
        EuclideanGeometry => euclidean_geometry(scaled, rng),
        QuantumComputing => quantum_computing(scaled, rng),
        MachineLearning => machine_learning(scaled, rng),
        BlockchainProtocols => blockchain_protocols(rng),
        DistributedSystems => distributed_systems(scaled, rng),
        OptimizationAlgorithms => optimization_algorithms(scaled, rng),
        GoldbachConjecture | PrimePatternDiscovery | TwinPrimes | CollatzConjecture
        | PerfectNumbers | MersennePrimes | FibonacciPatterns | PascalTriangle | NumberTheory => {
            return None
        }
    };
    Some(ill)
}

fn pick<T: Copy>(rng: &mut dyn RngCore, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

/// Uniform-ish integer in `[2^low_bits, 2^high_bits]`, built from raw limbs.
fn random_big_between(rng: &mut dyn RngCore, low_bits: u32, high_bits: u32) -> Integer {
    let low = Integer::from(1) << low_bits;
    let high = Integer::from(1) << high_bits;
    let span = Integer::from(&high - &low) + 1u32;
    // Two extra limbs keep the modulo bias negligible
    let limbs = high_bits as usize / 64 + 2;
    let digits: Vec<u64> = (0..limbs).map(|_| rng.next_u64()).collect();
    let raw = Integer::from_digits(&digits, Order::Lsf);
    low + raw % span
}

// ── Deterministic ───────────────────────────────────────────────

pub fn riemann_zeros(scaled: &Scaled) -> Illustration {
    let count = scaled.limit.min(10);
    let zeros: Vec<Value> = (0..count)
        .map(|i| json!({"real": 0.5, "imaginary": FIRST_ZERO_ORDINATE + i as f64 * 2.5}))
        .collect();
    Illustration::new(
        format!("Computed {} non-trivial zeros of Riemann zeta function", count),
        json!({"zeros_found": count, "zeros": zeros}),
    )
}

// ── Number Theory & Analysis ────────────────────────────────────

pub fn birch_swinnerton(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let curves: Vec<Value> = (0..scaled.limit.min(5))
        .map(|i| {
            json!({
                "curve_id": format!("E{}", i + 1),
                "l_value": rng.gen_range(0.1..10.0),
                "rank": rng.gen_range(0..=3u8),
            })
        })
        .collect();
    Illustration::new(
        format!("Computed L-functions for {} elliptic curves", curves.len()),
        json!({"curves_analyzed": curves.len(), "l_functions": curves}),
    )
}

pub fn differential_equations(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let solutions: Vec<Value> = (0..scaled.limit.min(3))
        .map(|i| {
            let (b, c) = (rng.gen_range(1..=5u8), rng.gen_range(1..=5u8));
            let (r1, r2) = (rng.gen_range(1..=3u8), rng.gen_range(1..=3u8));
            json!({
                "equation_id": format!("DE{}", i + 1),
                "equation": format!("y'' + {}y' + {}y = 0", b, c),
                "solution": format!("y = C1*e^(-{}x) + C2*e^(-{}x)", r1, r2),
                "complexity": pick(rng, &["linear", "nonlinear", "partial"]),
            })
        })
        .collect();
    Illustration::new(
        format!("Solved {} differential equations", solutions.len()),
        json!({"equations_solved": solutions.len(), "solutions": solutions}),
    )
}

// ── Physics ─────────────────────────────────────────────────────

pub fn yang_mills(rng: &mut dyn RngCore) -> Illustration {
    let field_strength: f64 = rng.gen_range(0.1..10.0);
    let energy_density: f64 = rng.gen_range(1.0..100.0);
    let topological_charge = rng.gen_range(-5..=5i8);
    let gauge_group = rng.gen_range(2..=5u8);
    Illustration::new(
        format!(
            "Solved Yang-Mills equations with field strength {:.3}",
            field_strength
        ),
        json!({
            "field_strength": field_strength,
            "energy_density": energy_density,
            "topological_charge": topological_charge,
            "gauge_field": format!("SU({})", gauge_group),
        }),
    )
}

pub fn navier_stokes(rng: &mut dyn RngCore) -> Illustration {
    let reynolds_number: f64 = rng.gen_range(100.0..10_000.0);
    let velocity_field = json!({
        "u": rng.gen_range(0.1..10.0),
        "v": rng.gen_range(0.1..10.0),
        "w": rng.gen_range(0.1..10.0),
    });
    let pressure_gradient: f64 = rng.gen_range(0.01..1.0);
    let flow_type = pick(rng, &["laminar", "turbulent", "transitional"]);
    Illustration::new(
        format!("Solved Navier-Stokes equations with Re={:.1}", reynolds_number),
        json!({
            "reynolds_number": reynolds_number,
            "velocity_field": velocity_field,
            "pressure_gradient": pressure_gradient,
            "flow_type": flow_type,
        }),
    )
}

pub fn quantum_computing(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    const GATES: [&str; 7] = ["H", "X", "Y", "Z", "CNOT", "SWAP", "Toffoli"];
    let qubits = scaled.limit;
    let circuit_depth = rng.gen_range(10..=100u32);
    let gates_used: Vec<&str> = rand::seq::index::sample(rng, GATES.len(), 5)
        .iter()
        .map(|i| GATES[i])
        .collect();
    let entanglement: f64 = rng.gen_range(0.0..1.0);
    Illustration::new(
        format!(
            "Optimized quantum circuit with {} qubits and depth {}",
            qubits, circuit_depth
        ),
        json!({
            "qubits": qubits,
            "circuit_depth": circuit_depth,
            "gates_used": gates_used,
            "entanglement_measure": entanglement,
        }),
    )
}

// ── Cryptography ────────────────────────────────────────────────

/// Field primes of NIST P-192, P-224 and P-256.
fn nist_field_primes() -> [Integer; 3] {
    let two = |e: u32| Integer::from(1) << e;
    [
        two(192) - two(64) - 1u32,
        two(224) - two(96) + two(64) - 1u32,
        two(256) - two(224) + two(192) + two(96) - 1u32,
    ]
}

pub fn elliptic_curve_crypto(rng: &mut dyn RngCore) -> Illustration {
    let primes = nist_field_primes();
    let p = &primes[rng.gen_range(0..primes.len())];
    let a = rng.gen_range(-10..=10i32);
    let b = rng.gen_range(-10..=10i32);
    let order = random_big_between(rng, 160, 256);
    let generator = (rng.gen_range(1..=100u32), rng.gen_range(1..=100u32));
    let security_level = format!("{}-bit", rng.gen_range(128..=256u32));
    Illustration::new(
        format!(
            "Generated secure elliptic curve with {} security",
            security_level
        ),
        json!({
            "curve_parameters": {
                "p": p.to_string(),
                "a": a,
                "b": b,
                "order": order.to_string(),
                "generator": [generator.0, generator.1],
            },
            "security_level": security_level,
        }),
    )
}

pub fn lattice_cryptography(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let dimension = scaled.limit;
    let modulus = random_big_between(rng, 100, 200);
    Illustration::new(
        format!(
            "Generated {}-dimensional lattice with modulus {}",
            dimension, modulus
        ),
        json!({
            "lattice_dimension": dimension,
            "modulus": modulus.to_string(),
            "secret_key_length": dimension.min(10),
            "quantum_resistance": "Yes",
        }),
    )
}

pub fn cryptographic_hash(rng: &mut dyn RngCore) -> Illustration {
    let hash_function = pick(rng, &["SHA-256", "SHA-512", "Blake2b", "Keccak", "Argon2"]);
    let hash_length = pick(rng, &[256u32, 512, 1024]);
    let collision_resistance = pick(rng, &["128-bit", "256-bit", "512-bit"]);
    Illustration::new(
        format!("Analyzed {} with {}-bit output", hash_function, hash_length),
        json!({
            "hash_function": hash_function,
            "hash_length": hash_length,
            "collision_resistance": collision_resistance,
        }),
    )
}

// ── Topology & Geometry ─────────────────────────────────────────

pub fn poincare_conjecture(rng: &mut dyn RngCore) -> Illustration {
    let dimension = rng.gen_range(2..=4u8);
    let euler = rng.gen_range(-10..=10i32);
    let fundamental_group = pick(rng, &["trivial", "cyclic", "free", "finite"]);
    Illustration::new(
        format!("Classified {}D manifold with χ={}", dimension, euler),
        json!({
            "manifold_dimension": dimension,
            "euler_characteristic": euler,
            "fundamental_group": fundamental_group,
            "is_sphere": euler == 2 && dimension == 3,
        }),
    )
}

pub fn algebraic_topology(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let mut euler: i64 = 0;
    let groups: Vec<Value> = (0..scaled.limit.min(5))
        .map(|dim| {
            let rank = rng.gen_range(0..=5i64);
            let torsion = pick(rng, &[None, Some(2u8), Some(3), Some(4), Some(6)]);
            euler += if dim % 2 == 0 { rank } else { -rank };
            json!({"dimension": dim, "rank": rank, "torsion": torsion})
        })
        .collect();
    Illustration::new(
        format!("Computed homology groups for {} dimensions", groups.len()),
        json!({"homology_groups": groups, "euler_characteristic": euler}),
    )
}

pub fn euclidean_geometry(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let mut total_area = 0.0;
    let objects: Vec<Value> = (0..scaled.limit.min(5))
        .map(|_| {
            let kind = pick(rng, &["triangle", "circle", "polygon", "polyhedron"]);
            let area: f64 = rng.gen_range(1.0..100.0);
            let perimeter: f64 = rng.gen_range(1.0..50.0);
            let properties = pick(rng, &["equilateral", "isosceles", "regular", "irregular"]);
            total_area += area;
            json!({"type": kind, "area": area, "perimeter": perimeter, "properties": properties})
        })
        .collect();
    Illustration::new(
        format!("Analyzed {} geometric objects", objects.len()),
        json!({"geometric_objects": objects, "total_area": total_area}),
    )
}

// ── Computing ───────────────────────────────────────────────────

pub fn machine_learning(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let algorithm = pick(
        rng,
        &["Neural Network", "SVM", "Random Forest", "Gradient Boosting", "Deep Learning"],
    );
    let accuracy: f64 = rng.gen_range(0.8..0.99);
    let model_complexity = pick(rng, &["low", "medium", "high"]);
    Illustration::new(
        format!("Trained {} with {:.3} accuracy", algorithm, accuracy),
        json!({
            "algorithm": algorithm,
            "accuracy": accuracy,
            "training_samples": scaled.limit,
            "model_complexity": model_complexity,
        }),
    )
}

pub fn blockchain_protocols(rng: &mut dyn RngCore) -> Illustration {
    let protocol = pick(rng, &["PoW", "PoS", "DPoS", "PoA", "PoC"]);
    let block_time: f64 = rng.gen_range(1.0..60.0);
    let throughput = rng.gen_range(100..=10_000u32);
    Illustration::new(
        format!("Developed {} protocol with {} TPS", protocol, throughput),
        json!({
            "protocol": protocol,
            "block_time": block_time,
            "throughput_tps": throughput,
            "consensus_mechanism": protocol,
        }),
    )
}

pub fn distributed_systems(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let nodes = scaled.limit;
    let consensus = pick(rng, &["Paxos", "Raft", "Byzantine", "Gossip"]);
    let fault_tolerance: f64 = rng.gen_range(0.5..1.0);
    let latency_ms: f64 = rng.gen_range(1.0..100.0);
    Illustration::new(
        format!("Analyzed {} consensus with {} nodes", consensus, nodes),
        json!({
            "nodes": nodes,
            "consensus_algorithm": consensus,
            "fault_tolerance": fault_tolerance,
            "latency_ms": latency_ms,
        }),
    )
}

pub fn optimization_algorithms(scaled: &Scaled, rng: &mut dyn RngCore) -> Illustration {
    let algorithm = pick(
        rng,
        &["Genetic", "Simulated Annealing", "Gradient Descent", "Branch and Bound"],
    );
    let iterations = scaled.limit;
    let convergence_rate: f64 = rng.gen_range(0.1..0.9);
    let optimal_solution: f64 = rng.gen_range(0.0..100.0);
    Illustration::new(
        format!("Optimized {} algorithm with {} iterations", algorithm, iterations),
        json!({
            "algorithm": algorithm,
            "iterations": iterations,
            "convergence_rate": convergence_rate,
            "optimal_solution": optimal_solution,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaled(difficulty: u64, limit: u64) -> Scaled {
        Scaled {
            difficulty,
            limit,
            clamped: false,
        }
    }

    #[test]
    fn same_seed_same_payload() {
        let s = scaled(3, 30);
        let a = birch_swinnerton(&s, &mut seeded_rng(42, "birch-swinnerton", 3));
        let b = birch_swinnerton(&s, &mut seeded_rng(42, "birch-swinnerton", 3));
        assert_eq!(a, b);
    }

    #[test]
    fn generate_covers_exactly_the_simulated_types() {
        let s = scaled(1, 1);
        let mut rng = seeded_rng(0, "all", 1);
        for w in WorkType::ALL {
            let out = generate(w, &s, &mut rng);
            assert_eq!(out.is_some(), !w.is_algorithmic(), "{}", w);
        }
    }

    #[test]
    fn seed_inputs_all_matter() {
        let base = seeded_rng(1, "yang-mills-theory", 2).next_u64();
        assert_ne!(base, seeded_rng(2, "yang-mills-theory", 2).next_u64());
        assert_ne!(base, seeded_rng(1, "navier-stokes", 2).next_u64());
        assert_ne!(base, seeded_rng(1, "yang-mills-theory", 3).next_u64());
    }

    #[test]
    fn riemann_is_deterministic_and_capped() {
        let z = riemann_zeros(&scaled(5, 500));
        assert_eq!(z.body["zeros_found"], 10);
        let zeros = z.body["zeros"].as_array().unwrap();
        assert_eq!(zeros.len(), 10);
        assert_eq!(zeros[0]["real"], 0.5);
        assert_eq!(zeros[0]["imaginary"], FIRST_ZERO_ORDINATE);
        assert_eq!(riemann_zeros(&scaled(1, 100)), riemann_zeros(&scaled(1, 100)));
    }

    #[test]
    fn bodies_are_marked_simulated() {
        let mut rng = seeded_rng(0, "x", 1);
        for ill in [
            yang_mills(&mut rng),
            navier_stokes(&mut rng),
            cryptographic_hash(&mut rng),
            blockchain_protocols(&mut rng),
        ] {
            assert_eq!(ill.body["simulated"], true);
            assert!(!ill.proof.is_empty());
        }
    }

    #[test]
    fn list_lengths_follow_limits() {
        let mut rng = seeded_rng(0, "x", 1);
        let d = differential_equations(&scaled(1, 5), &mut rng);
        assert_eq!(d.body["solutions"].as_array().unwrap().len(), 3);
        let t = algebraic_topology(&scaled(2, 2), &mut rng);
        assert_eq!(t.body["homology_groups"].as_array().unwrap().len(), 2);
        let g = euclidean_geometry(&scaled(9, 9), &mut rng);
        assert_eq!(g.body["geometric_objects"].as_array().unwrap().len(), 5);
        let q = quantum_computing(&scaled(4, 8), &mut rng);
        assert_eq!(q.body["qubits"], 8);
        assert_eq!(q.body["gates_used"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn topology_euler_is_alternating_rank_sum() {
        let t = algebraic_topology(&scaled(5, 5), &mut seeded_rng(9, "algebraic-topology", 5));
        let groups = t.body["homology_groups"].as_array().unwrap();
        let expected: i64 = groups
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let r = g["rank"].as_i64().unwrap();
                if i % 2 == 0 {
                    r
                } else {
                    -r
                }
            })
            .sum();
        assert_eq!(t.body["euler_characteristic"], expected);
    }

    #[test]
    fn big_parameters_stay_in_range() {
        let mut rng = seeded_rng(7, "elliptic-curve-crypto", 1);
        for _ in 0..50 {
            let n = random_big_between(&mut rng, 160, 256);
            assert!(n >= (Integer::from(1) << 160u32));
            assert!(n <= (Integer::from(1) << 256u32));
        }
        let ecc = elliptic_curve_crypto(&mut rng);
        let p = ecc.body["curve_parameters"]["p"].as_str().unwrap();
        let primes: Vec<String> = nist_field_primes().iter().map(|p| p.to_string()).collect();
        assert!(primes.iter().any(|q| q == p));
        assert_eq!(
            primes[0],
            "6277101735386680763835789423207666416083908700390324961279"
        );
    }
}
