//! TOML configuration structs, parsing, and validation.
//!
//! An engine TOML tunes the three places where a deployment may differ: the
//! scaler's resource limits, the registry's scoring and seeding, and the HTTP
//! server. Every section and every field is optional; an empty file is the
//! default configuration.
//!
//! ```toml
//! [limits]
//! max_sieve_bound = 10000000
//! max_pascal_rows = 20
//!
//! [registry]
//! research_weight = 10.0
//! seed = 42
//!
//! [server]
//! port = 5000
//! cache_ttl_secs = 3600
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::sequences::MAX_PASCAL_ROWS;
use crate::sieve::SIEVE_LIMIT;

/// Largest `max_sieve_bound` a config may set. The sieve bitmap and prime
/// list for this bound take a few hundred MiB.
pub const MAX_SIEVE_CEILING: u64 = 250_000_000;

// ── TOML Configuration Structs ──────────────────────────────────

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// The `[limits]` section: resource bounds enforced by the scaler and the
/// display caps applied to payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Largest bound handed to the sieve.
    pub max_sieve_bound: u64,
    /// Largest Fibonacci sequence length.
    pub max_fibonacci_terms: u64,
    /// Pascal row count is clamped, not rejected, at this value.
    pub max_pascal_rows: u64,
    /// Collatz runs longer than this abort.
    pub max_collatz_steps: u64,
    pub goldbach_display_pairs: usize,
    pub twin_scan_pairs: usize,
    pub twin_display_pairs: usize,
    pub gap_display: usize,
    pub sequence_prefix: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_sieve_bound: SIEVE_LIMIT,
            max_fibonacci_terms: 20_000,
            max_pascal_rows: 20,
            max_collatz_steps: 1_000_000,
            goldbach_display_pairs: 5,
            twin_scan_pairs: 10,
            twin_display_pairs: 5,
            gap_display: 10,
            sequence_prefix: 10,
        }
    }
}

/// The `[registry]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// `research_value = difficulty × research_weight`.
    pub research_weight: f64,
    /// Base seed for the illustrative handlers when a request carries none.
    pub seed: u64,
    /// Reported by `/health`.
    pub engine_type: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            research_weight: 10.0,
            seed: 0,
            engine_type: "multi".to_string(),
        }
    }
}

/// The `[server]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Result cache lifetime; 0 disables caching.
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 5000,
            cache_ttl_secs: 3600,
            request_timeout_secs: 30,
        }
    }
}

// ── TOML Parsing ────────────────────────────────────────────────

/// Parse an engine configuration from a TOML string.
pub fn parse_toml(content: &str) -> Result<EngineConfig> {
    let config: EngineConfig = toml::from_str(content).context("invalid engine config TOML")?;
    config.validate()?;
    Ok(config)
}

/// Parse an engine configuration from a TOML file path.
pub fn load(path: &Path) -> Result<EngineConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    parse_toml(&content).with_context(|| format!("loading config {}", path.display()))
}

/// Load from `path` when given, otherwise use defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => load(p),
        None => Ok(EngineConfig::default()),
    }
}

impl EngineConfig {
    /// Reject values no computation could run under.
    pub fn validate(&self) -> Result<()> {
        let l = &self.limits;
        if l.max_sieve_bound < 2 {
            anyhow::bail!("limits.max_sieve_bound must be at least 2");
        }
        if l.max_sieve_bound > MAX_SIEVE_CEILING {
            anyhow::bail!(
                "limits.max_sieve_bound = {} exceeds the ceiling of {}",
                l.max_sieve_bound,
                MAX_SIEVE_CEILING
            );
        }
        if l.max_fibonacci_terms == 0 {
            anyhow::bail!("limits.max_fibonacci_terms must be positive");
        }
        if l.max_pascal_rows == 0 {
            anyhow::bail!("limits.max_pascal_rows must be positive");
        }
        if l.max_pascal_rows > MAX_PASCAL_ROWS as u64 {
            anyhow::bail!(
                "limits.max_pascal_rows = {} exceeds {}, the largest triangle whose entries fit in 64 bits",
                l.max_pascal_rows,
                MAX_PASCAL_ROWS
            );
        }
        if l.max_collatz_steps == 0 {
            anyhow::bail!("limits.max_collatz_steps must be positive");
        }
        if l.goldbach_display_pairs == 0
            || l.twin_scan_pairs == 0
            || l.twin_display_pairs == 0
            || l.gap_display == 0
            || l.sequence_prefix == 0
        {
            anyhow::bail!("limits display caps must be positive");
        }

        let w = self.registry.research_weight;
        if !w.is_finite() || w < 0.0 {
            anyhow::bail!("registry.research_weight must be a finite non-negative number, got {}", w);
        }
        if self.registry.engine_type.trim().is_empty() {
            anyhow::bail!("registry.engine_type must not be empty");
        }

        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be positive");
        }
        Ok(())
    }
}
