//! # Registry — Work-Type Dispatch and the Result Envelope
//!
//! Maps a work-type key to a pure handler, scales the request's difficulty,
//! times the handler and wraps what it returns in a [`ComputationResult`].
//!
//! ## Dispatch Sequence
//!
//! 1. Reject difficulty < 1 (before anything else, for every key).
//! 2. Parse the key. Unrecognized keys, and known keys missing from a custom
//!    handler table, get a placeholder payload with `success = true`.
//! 3. Scale the difficulty by the work type's rule; a rejected bound fails the
//!    request with `computation_overflow`.
//! 4. Run the handler. Kernel errors become `success = false` with
//!    `error = {kind, message}` and no payload.
//!
//! The handler table is built once by [`Registry::new`] and never mutated, so
//! a registry can be shared across threads behind an `Arc` without locking.
//! Dispatch performs no I/O and keeps no cache.
//!
//! ## Randomness
//!
//! Illustrative handlers draw from an injected `RngCore`. [`Registry::dispatch`]
//! derives it from `(seed, work_type, difficulty)` where `seed` is
//! `parameters.seed` when present and the configured registry seed otherwise.
//! [`Registry::dispatch_with_rng`] lets the caller supply the generator.

use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{EngineConfig, Limits, RegistryConfig};
use crate::error::{ComputeError, ErrorKind};
use crate::illustrative::{self, Illustration};
use crate::patterns;
use crate::scaling::{self, Scaled};
use crate::search;
use crate::sequences::{self, CollatzTrajectory, FibonacciSummary};
use crate::sieve;
use crate::work_type::{WorkType, WorkTypeKey};

/// Open key/value parameters carried by a request.
pub type Parameters = Map<String, Value>;

/// Rows of Pascal's triangle included in the payload.
const PASCAL_DISPLAY_ROWS: usize = 5;

/// Collatz trajectories per request, at most.
const COLLATZ_MAX_SEQUENCES: u64 = 5;

// ── Request / Result ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationRequest {
    pub work_type: String,
    pub difficulty: i64,
    #[serde(default)]
    pub parameters: Parameters,
}

impl ComputationRequest {
    pub fn new(work_type: impl Into<String>, difficulty: i64) -> Self {
        ComputationRequest {
            work_type: work_type.into(),
            difficulty,
            parameters: Parameters::new(),
        }
    }

    /// Hex SHA-256 over the canonical work-type key, the difficulty and the
    /// parameters.
    ///
    /// Alias spellings of a catalog key hash like the key itself.
    /// `serde_json::Map` keeps keys sorted, so two requests whose parameters
    /// differ only in key order hash identically.
    pub fn cache_key(&self) -> String {
        let params = serde_json::to_string(&self.parameters).unwrap_or_default();
        let key = WorkTypeKey::parse(&self.work_type);
        let mut hasher = Sha256::new();
        hasher.update(key.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(self.difficulty.to_le_bytes());
        hasher.update(params.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// Failure details carried by an unsuccessful envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub message: String,
}

/// The envelope returned for every dispatch.
#[derive(Debug, Clone, Serialize)]
pub struct ComputationResult {
    pub work_type: String,
    pub success: bool,
    #[serde(rename = "result", skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    /// Seconds spent in scaling and the handler.
    #[serde(rename = "computation_time")]
    pub elapsed_time: f64,
    pub research_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

/// Handler output plus the fields every payload shares.
#[derive(Debug, Clone, Serialize)]
pub struct Payload {
    pub work_type: String,
    pub difficulty: u64,
    #[serde(flatten)]
    pub body: PayloadBody,
    pub proof: String,
    pub status: &'static str,
}

/// Work-type specific part of a payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PayloadBody {
    PrimePatterns(PrimePatternBody),
    Goldbach(GoldbachBody),
    TwinPrimes(TwinPrimeBody),
    Collatz(CollatzBody),
    PerfectNumbers(PerfectNumberBody),
    MersennePrimes(MersennePrimeBody),
    Fibonacci(FibonacciBody),
    Pascal(PascalBody),
    NumberTheory(NumberTheoryBody),
    /// Illustrative handlers and the placeholder.
    Json(Map<String, Value>),
}

#[derive(Debug, Clone, Serialize)]
pub struct PrimePatternBody {
    pub limit: u64,
    pub primes_found: usize,
    pub patterns: PrimePatterns,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrimePatterns {
    /// Leading gaps only; the statistics cover every gap.
    pub gaps: Vec<u64>,
    pub average_gap: f64,
    pub max_gap: u64,
    pub min_gap: u64,
    pub gap_histogram: BTreeMap<u64, usize>,
    pub pattern_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoldbachBody {
    pub even_number: u64,
    pub goldbach_pairs: Vec<(u64, u64)>,
    pub total_pairs: usize,
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TwinPrimeBody {
    pub limit: u64,
    pub twin_pairs_found: usize,
    pub twin_pairs: Vec<(u64, u64)>,
    pub scan_capped: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollatzBody {
    pub sequences_verified: usize,
    pub sequences: Vec<CollatzTrajectory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerfectNumberBody {
    pub limit: u64,
    pub perfect_numbers_found: usize,
    pub perfect_numbers: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MersennePrimeBody {
    pub limit: u64,
    pub mersenne_primes_found: usize,
    pub mersenne_primes: Vec<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FibonacciBody {
    pub fibonacci_sequence: Vec<u64>,
    pub patterns: FibonacciSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct PascalBody {
    pub triangle: Vec<Vec<u64>>,
    pub properties: PascalProperties,
}

#[derive(Debug, Clone, Serialize)]
pub struct PascalProperties {
    pub rows_generated: usize,
    /// Row sums reach 2^67, past `u64`.
    pub sum_of_nth_row: u128,
    pub largest_number: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumberTheoryBody {
    pub results: NumberTheoryResults,
}

#[derive(Debug, Clone, Serialize)]
pub struct NumberTheoryResults {
    pub limit: u64,
    pub primes_found: usize,
    pub perfect_squares: Vec<u64>,
    pub fibonacci_numbers: Vec<u64>,
}

// ── Handlers ────────────────────────────────────────────────────

/// Everything a handler may read.
pub struct HandlerInput<'a> {
    pub work_type: WorkType,
    pub scaled: Scaled,
    pub parameters: &'a Parameters,
    pub limits: &'a Limits,
}

/// What a handler produces; the registry adds the shared payload fields.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub proof: String,
    pub body: PayloadBody,
}

impl From<Illustration> for Outcome {
    fn from(ill: Illustration) -> Self {
        Outcome {
            proof: ill.proof,
            body: PayloadBody::Json(ill.body),
        }
    }
}

pub type Handler = fn(&HandlerInput<'_>, &mut dyn RngCore) -> Result<Outcome, ComputeError>;

/// Handler for one work type.
pub fn default_handler(work_type: WorkType) -> Handler {
    use WorkType::*;
    match work_type {
        PrimePatternDiscovery => prime_patterns,
        GoldbachConjecture => goldbach,
        TwinPrimes => twin_primes,
        CollatzConjecture => collatz,
        PerfectNumbers => perfect_numbers,
        MersennePrimes => mersenne_primes,
        FibonacciPatterns => fibonacci_patterns,
        PascalTriangle => pascal_triangle,
        NumberTheory => number_theory,
        RiemannZeros | BirchSwinnerton | DifferentialEquations | YangMillsTheory
        | NavierStokes | EllipticCurveCrypto | LatticeCryptography | CryptographicHash
        | PoincareConjecture | AlgebraicTopology | EuclideanGeometry | QuantumComputing
        | MachineLearning | BlockchainProtocols | DistributedSystems
        | OptimizationAlgorithms => simulated,
    }
}

/// The full table: one entry per known work type.
pub fn default_handlers() -> BTreeMap<WorkType, Handler> {
    WorkType::ALL
        .iter()
        .map(|&w| (w, default_handler(w)))
        .collect()
}

/// Read an optional integer parameter; present with the wrong type is an error.
fn int_param(parameters: &Parameters, key: &str) -> Result<Option<i64>, ComputeError> {
    match parameters.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v.as_i64().map(Some).ok_or_else(|| {
            ComputeError::invalid(format!("parameter '{}' must be an integer, got {}", key, v))
        }),
    }
}

fn to_usize(value: u64, what: &'static str) -> Result<usize, ComputeError> {
    usize::try_from(value).map_err(|_| ComputeError::overflow(what, value, usize::MAX))
}

fn prime_patterns(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let limit = match int_param(input.parameters, "limit")? {
        None => input.scaled.limit,
        Some(l) if l < 0 => {
            return Err(ComputeError::invalid(format!(
                "parameter 'limit' must be non-negative, got {}",
                l
            )))
        }
        Some(l) if l as u64 > input.limits.max_sieve_bound => {
            return Err(ComputeError::overflow(
                "sieve bound",
                l,
                input.limits.max_sieve_bound,
            ))
        }
        Some(l) => l as u64,
    };

    let primes = sieve::generate_primes(limit);
    let stats = patterns::analyze(&primes);
    let body = PrimePatternBody {
        limit,
        primes_found: primes.len(),
        patterns: PrimePatterns {
            gaps: stats.leading_gaps(input.limits.gap_display).to_vec(),
            average_gap: stats.average_gap,
            max_gap: stats.max_gap,
            min_gap: stats.min_gap,
            gap_histogram: stats.gap_histogram(),
            pattern_type: "random_distribution",
        },
    };
    Ok(Outcome {
        proof: format!("Analyzed prime patterns up to {}", limit),
        body: PayloadBody::PrimePatterns(body),
    })
}

fn goldbach(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let n = input.scaled.limit;
    let primes = sieve::generate_primes(n);
    let found = search::goldbach_pairs(n, &primes, input.limits.goldbach_display_pairs)?;
    let proof = if found.verified() {
        format!("Verified Goldbach conjecture for {}", n)
    } else {
        format!("No Goldbach partition found for {}", n)
    };
    Ok(Outcome {
        proof,
        body: PayloadBody::Goldbach(GoldbachBody {
            even_number: n,
            verified: found.verified(),
            total_pairs: found.total_pairs,
            goldbach_pairs: found.pairs,
        }),
    })
}

fn twin_primes(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let limit = input.scaled.limit;
    let primes = sieve::generate_primes(limit);
    let scan = search::twin_primes(&primes, input.limits.twin_scan_pairs);
    let found = scan.pairs.len();
    let mut shown = scan.pairs;
    shown.truncate(input.limits.twin_display_pairs);
    Ok(Outcome {
        proof: format!("Found {} twin prime pairs up to {}", found, limit),
        body: PayloadBody::TwinPrimes(TwinPrimeBody {
            limit,
            twin_pairs_found: found,
            twin_pairs: shown,
            scan_capped: scan.capped,
        }),
    })
}

fn collatz(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let start = match int_param(input.parameters, "start")? {
        Some(s) => s,
        None => i64::try_from(input.scaled.limit)
            .map_err(|_| ComputeError::overflow("collatz start", input.scaled.limit, i64::MAX))?,
    };
    let max_steps = to_usize(input.limits.max_collatz_steps, "collatz steps")?;
    let count = input.scaled.difficulty.min(COLLATZ_MAX_SEQUENCES) as i64;

    let mut sequences = Vec::with_capacity(count as usize);
    for i in 0..count {
        let s = start
            .checked_add(i)
            .ok_or_else(|| ComputeError::overflow("collatz start", start, i64::MAX))?;
        sequences.push(sequences::collatz_trajectory(
            s,
            max_steps,
            input.limits.sequence_prefix,
        )?);
    }
    Ok(Outcome {
        proof: format!(
            "Verified Collatz conjecture for {} sequences",
            sequences.len()
        ),
        body: PayloadBody::Collatz(CollatzBody {
            sequences_verified: sequences.len(),
            sequences,
        }),
    })
}

fn perfect_numbers(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let limit = input.scaled.limit;
    let found = search::perfect_numbers_up_to(limit);
    Ok(Outcome {
        proof: format!("Verified {} perfect numbers up to {}", found.len(), limit),
        body: PayloadBody::PerfectNumbers(PerfectNumberBody {
            limit,
            perfect_numbers_found: found.len(),
            perfect_numbers: found,
        }),
    })
}

fn mersenne_primes(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let limit = input.scaled.limit;
    let found = search::mersenne_primes_up_to(limit);
    Ok(Outcome {
        proof: format!("Verified {} Mersenne primes up to {}", found.len(), limit),
        body: PayloadBody::MersennePrimes(MersennePrimeBody {
            limit,
            mersenne_primes_found: found.len(),
            mersenne_primes: found,
        }),
    })
}

fn fibonacci_patterns(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let length = to_usize(input.scaled.limit, "fibonacci length")?;
    let (head, summary) = sequences::summarize_fibonacci(length, input.limits.sequence_prefix);
    Ok(Outcome {
        proof: format!(
            "Analyzed Fibonacci patterns for {} numbers",
            summary.sequence_length
        ),
        body: PayloadBody::Fibonacci(FibonacciBody {
            fibonacci_sequence: head,
            patterns: summary,
        }),
    })
}

fn pascal_triangle(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let rows = to_usize(input.scaled.limit, "pascal rows")?;
    let triangle = sequences::pascal_triangle(rows)?;
    let properties = PascalProperties {
        rows_generated: triangle.len(),
        sum_of_nth_row: triangle
            .last()
            .map_or(0, |row| row.iter().map(|&x| x as u128).sum()),
        largest_number: triangle
            .iter()
            .flat_map(|row| row.iter().copied())
            .max()
            .unwrap_or(0),
    };
    let shown: Vec<Vec<u64>> = triangle.into_iter().take(PASCAL_DISPLAY_ROWS).collect();
    Ok(Outcome {
        proof: format!(
            "Generated Pascal's triangle with {} rows",
            properties.rows_generated
        ),
        body: PayloadBody::Pascal(PascalBody {
            triangle: shown,
            properties,
        }),
    })
}

fn number_theory(input: &HandlerInput<'_>, _: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    let limit = input.scaled.limit;
    let primes_found = sieve::generate_primes(limit).len();
    let perfect_squares: Vec<u64> = (1..=sieve::isqrt(limit)).map(|i| i * i).collect();

    // Runs until the first term at or past the bound; the bound is capped by
    // the sieve limit so every term fits in u64.
    let mut fibonacci_numbers: Vec<u64> = vec![0, 1];
    let (mut a, mut b) = (0u64, 1u64);
    while b < limit {
        let next = a
            .checked_add(b)
            .ok_or_else(|| ComputeError::overflow("fibonacci term", limit, u64::MAX))?;
        fibonacci_numbers.push(next);
        (a, b) = (b, next);
    }

    Ok(Outcome {
        proof: format!("Conducted number theory research up to {}", limit),
        body: PayloadBody::NumberTheory(NumberTheoryBody {
            results: NumberTheoryResults {
                limit,
                primes_found,
                perfect_squares,
                fibonacci_numbers,
            },
        }),
    })
}

fn simulated(input: &HandlerInput<'_>, rng: &mut dyn RngCore) -> Result<Outcome, ComputeError> {
    match illustrative::generate(input.work_type, &input.scaled, rng) {
        Some(ill) => Ok(ill.into()),
        None => placeholder(input.work_type.as_str(), input.scaled.difficulty),
    }
}

/// Payload for a key without a handler. Echoes the key and difficulty.
fn placeholder(work_type: &str, difficulty: u64) -> Result<Outcome, ComputeError> {
    let steps = difficulty
        .checked_mul(10)
        .ok_or_else(|| ComputeError::overflow("computation steps", difficulty, u64::MAX / 10))?;
    let mut body = Map::new();
    body.insert("solution".into(), Value::from(format!("Solution for {}", work_type)));
    body.insert("computation_steps".into(), Value::from(steps));
    Ok(Outcome {
        proof: format!("Mathematical proof for {}", work_type),
        body: PayloadBody::Json(body),
    })
}

// ── Registry ────────────────────────────────────────────────────

/// Immutable dispatcher over a handler table.
pub struct Registry {
    handlers: BTreeMap<WorkType, Handler>,
    limits: Limits,
    config: RegistryConfig,
}

impl Registry {
    /// Registry with every known work type wired to its handler.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_handlers(config, default_handlers())
    }

    /// Registry over a custom table. Known types absent from `handlers`
    /// receive the placeholder payload.
    pub fn with_handlers(config: &EngineConfig, handlers: BTreeMap<WorkType, Handler>) -> Self {
        Registry {
            handlers,
            limits: config.limits.clone(),
            config: config.registry.clone(),
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn engine_type(&self) -> &str {
        &self.config.engine_type
    }

    /// Number of work types with a registered handler.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn dispatch_request(&self, request: &ComputationRequest) -> ComputationResult {
        self.dispatch(&request.work_type, request.difficulty, &request.parameters)
    }

    /// Dispatch with the generator derived from the request seed.
    pub fn dispatch(&self, work_type: &str, difficulty: i64, parameters: &Parameters) -> ComputationResult {
        let start = Instant::now();
        let key = WorkTypeKey::parse(work_type);
        let seeded = scaling::validate_difficulty(difficulty)
            .and_then(|d| Ok((d, self.request_seed(parameters)?)));
        let (d, seed) = match seeded {
            Ok(v) => v,
            Err(e) => return self.failure(key.as_str(), e, start),
        };
        let mut rng = illustrative::seeded_rng(seed, key.as_str(), d);
        self.dispatch_with_rng(work_type, difficulty, parameters, &mut rng)
    }

    /// Dispatch with a caller-supplied random source.
    pub fn dispatch_with_rng(
        &self,
        work_type: &str,
        difficulty: i64,
        parameters: &Parameters,
        rng: &mut dyn RngCore,
    ) -> ComputationResult {
        let start = Instant::now();
        let key = WorkTypeKey::parse(work_type);
        match self.run(&key, difficulty, parameters, rng) {
            Ok(payload) => {
                let elapsed = start.elapsed().as_secs_f64();
                debug!(work_type = %key, difficulty, elapsed, "computation completed");
                ComputationResult {
                    work_type: payload.work_type.clone(),
                    success: true,
                    research_value: payload.difficulty as f64 * self.config.research_weight,
                    payload: Some(payload),
                    elapsed_time: elapsed,
                    error: None,
                }
            }
            Err(e) => self.failure(key.as_str(), e, start),
        }
    }

    /// Dispatch independent requests on the rayon pool. Output order matches
    /// input order.
    pub fn dispatch_many(&self, requests: &[ComputationRequest]) -> Vec<ComputationResult> {
        requests
            .par_iter()
            .map(|r| self.dispatch_request(r))
            .collect()
    }

    fn run(
        &self,
        key: &WorkTypeKey,
        difficulty: i64,
        parameters: &Parameters,
        rng: &mut dyn RngCore,
    ) -> Result<Payload, ComputeError> {
        let d = scaling::validate_difficulty(difficulty)?;

        let (work_type, handler) = match key {
            WorkTypeKey::Known(w) => match self.handlers.get(w) {
                Some(h) => (*w, *h),
                None => {
                    info!(work_type = %w, "no handler registered, returning placeholder");
                    return placeholder(w.as_str(), d).map(|o| wrap(w.as_str(), d, o));
                }
            },
            WorkTypeKey::Unrecognized(name) => {
                info!(work_type = %name, "unrecognized work type, returning placeholder");
                return placeholder(name, d).map(|o| wrap(name, d, o));
            }
        };

        let scaled = scaling::rule_for(work_type, &self.limits).apply(d)?;
        let input = HandlerInput {
            work_type,
            scaled,
            parameters,
            limits: &self.limits,
        };
        let outcome = handler(&input, rng)?;
        Ok(wrap(work_type.as_str(), d, outcome))
    }

    fn request_seed(&self, parameters: &Parameters) -> Result<u64, ComputeError> {
        match parameters.get("seed") {
            None | Some(Value::Null) => Ok(self.config.seed),
            Some(v) => v.as_u64().ok_or_else(|| {
                ComputeError::invalid(format!(
                    "parameter 'seed' must be a non-negative integer, got {}",
                    v
                ))
            }),
        }
    }

    fn failure(&self, work_type: &str, error: ComputeError, start: Instant) -> ComputationResult {
        warn!(work_type, error = %error, "computation failed");
        ComputationResult {
            work_type: work_type.to_string(),
            success: false,
            payload: None,
            elapsed_time: start.elapsed().as_secs_f64(),
            research_value: 0.0,
            error: Some(ErrorInfo {
                kind: error.kind(),
                message: error.to_string(),
            }),
        }
    }
}

fn wrap(work_type: &str, difficulty: u64, outcome: Outcome) -> Payload {
    Payload {
        work_type: work_type.to_string(),
        difficulty,
        body: outcome.body,
        proof: outcome.proof,
        status: "completed",
    }
}
