//! # mathwork — Work-Type Computation Registry
//!
//! A catalog of named mathematical work types, each mapped to a pure,
//! bounded computation. Given a work-type key and a difficulty, the
//! [`Registry`] scales the difficulty into concrete bounds, runs the matching
//! kernel and returns a [`ComputationResult`] envelope with a structured
//! payload and a one-line proof string.
//!
//! ## Layers (leaf first)
//!
//! | Module | Role |
//! |--------|------|
//! | [`sieve`] | Primes up to a bound; trial-division primality |
//! | [`patterns`] | Gap statistics over a prime sequence |
//! | [`sequences`] | Fibonacci, Pascal's triangle, Collatz trajectories |
//! | [`search`] | Goldbach pairs, twin primes, perfect/Mersenne membership |
//! | [`scaling`] | Difficulty → bound, per work type |
//! | [`work_type`] | The closed catalog of work types |
//! | [`illustrative`] | Seeded random stand-ins for open problems |
//! | [`registry`] | Handler table, dispatch, result envelope |
//!
//! Outside the core: [`config`] (TOML), [`prom_metrics`], and [`server`]
//! (Axum HTTP API). The core performs no I/O and holds no mutable state.

pub mod config;
pub mod error;
pub mod illustrative;
pub mod patterns;
pub mod prom_metrics;
pub mod registry;
pub mod scaling;
pub mod search;
pub mod sequences;
pub mod server;
pub mod sieve;
pub mod work_type;

pub use config::EngineConfig;
pub use error::{ComputeError, ErrorKind};
pub use registry::{ComputationRequest, ComputationResult, Parameters, Registry};
pub use work_type::{WorkType, WorkTypeKey};
