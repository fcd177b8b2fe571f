//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Each `run_*`
//! function returns `Ok(false)` when the command ran but a computation
//! reported failure, so `main` can exit non-zero without an error trace.

use anyhow::{Context, Result};
use mathwork::config::{self, EngineConfig};
use mathwork::registry::{ComputationRequest, Parameters, Registry};
use mathwork::work_type::{self, WorkType};
use std::io::Write;
use tracing::{info, warn};

use super::Cli;

/// Load the TOML config (or defaults) and apply command-line overrides.
pub fn load_config(cli: &Cli) -> Result<EngineConfig> {
    let mut config = config::load_or_default(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.registry.seed = seed;
    }
    Ok(config)
}

fn parse_params(raw: Option<&str>) -> Result<Parameters> {
    let Some(raw) = raw else {
        return Ok(Parameters::new());
    };
    let value: serde_json::Value =
        serde_json::from_str(raw).context("--params must be valid JSON")?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("--params must be a JSON object, got {}", other),
    }
}

// ── Subcommands ─────────────────────────────────────────────────

pub fn run_compute(
    config: &EngineConfig,
    work_type: &str,
    difficulty: i64,
    params: Option<&str>,
    pretty: bool,
) -> Result<bool> {
    let parameters = parse_params(params)?;
    let registry = Registry::new(config);
    let result = registry.dispatch(work_type, difficulty, &parameters);

    let out = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", out);

    if let Some(err) = &result.error {
        warn!(work_type, kind = err.kind.as_str(), "computation failed");
    }
    Ok(result.success)
}

pub fn run_list(json: bool) -> Result<bool> {
    let catalog = work_type::catalog();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&catalog)?)?;
        return Ok(true);
    }
    for entry in &catalog {
        writeln!(
            out,
            "{:>2}  {:<26} {:<14} {}{}",
            entry.index,
            entry.id,
            entry.complexity.as_str(),
            entry.name,
            if entry.algorithmic { "" } else { " (simulated)" }
        )?;
    }
    Ok(true)
}

pub fn run_sweep(config: &EngineConfig, difficulty: i64) -> Result<bool> {
    let registry = Registry::new(config);
    let requests: Vec<ComputationRequest> = WorkType::ALL
        .iter()
        .map(|w| ComputationRequest::new(w.as_str(), difficulty))
        .collect();

    let start = std::time::Instant::now();
    let results = registry.dispatch_many(&requests);
    let failed = results.iter().filter(|r| !r.success).count();
    info!(
        difficulty,
        work_types = results.len(),
        failed,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "sweep complete"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for r in &results {
        match (&r.payload, &r.error) {
            (Some(p), _) => writeln!(
                out,
                "{:<26} ok    {:>9.4}s  {}",
                r.work_type, r.elapsed_time, p.proof
            )?,
            (None, Some(e)) => writeln!(
                out,
                "{:<26} FAIL  {:>9.4}s  {}: {}",
                r.work_type,
                r.elapsed_time,
                e.kind.as_str(),
                e.message
            )?,
            (None, None) => writeln!(out, "{:<26} FAIL", r.work_type)?,
        }
    }
    Ok(failed == 0)
}

// ── Rayon ───────────────────────────────────────────────────────

pub fn configure_rayon(threads: Option<usize>) {
    let num_threads = threads.unwrap_or(0);
    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}
