//! # Main — CLI Entry Point
//!
//! Routes CLI subcommands to the registry and the HTTP server. Handles shared
//! concerns: `.env` loading, structured logging, configuration loading and the
//! Rayon thread pool.
//!
//! ## Subcommands
//!
//! - `compute`: dispatch one work type and print the JSON envelope.
//! - `list`: print the work-type catalog.
//! - `sweep`: dispatch every known work type in parallel at one difficulty.
//! - `serve`: run the HTTP API.
//!
//! ## Global Options
//!
//! - `--config` / `MATHWORK_CONFIG`: engine TOML (defaults apply when absent).
//! - `--seed` / `MATHWORK_SEED`: base seed for the illustrative handlers.
//! - `--threads`: Rayon thread pool size (defaults to all logical cores).

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "mathwork",
    version,
    about = "Dispatch bounded mathematical computations by work type"
)]
struct Cli {
    /// Path to an engine TOML file (limits, registry, server sections)
    #[arg(long, env = "MATHWORK_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Base seed for illustrative handlers (overrides registry.seed)
    #[arg(long, env = "MATHWORK_SEED", global = true)]
    seed: Option<u64>,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one computation and print its result envelope as JSON
    Compute {
        /// Work-type key, e.g. prime-pattern-discovery
        #[arg(long)]
        work_type: String,
        /// Difficulty (must be at least 1)
        #[arg(long, allow_negative_numbers = true)]
        difficulty: i64,
        /// Extra parameters as a JSON object, e.g. '{"limit": 500}'
        #[arg(long)]
        params: Option<String>,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List every known work type
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run every known work type at one difficulty
    Sweep {
        /// Difficulty applied to every work type
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        difficulty: i64,
    },
    /// Start the HTTP API
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();

    // Initialize structured logging: LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::configure_rayon(cli.threads);
    let config = cli::load_config(&cli)?;

    let ok = match &cli.command {
        Commands::Compute {
            work_type,
            difficulty,
            params,
            pretty,
        } => cli::run_compute(&config, work_type, *difficulty, params.as_deref(), *pretty)?,
        Commands::List { json } => cli::run_list(*json)?,
        Commands::Sweep { difficulty } => cli::run_sweep(&config, *difficulty)?,
        Commands::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(mathwork::server::run(&config, port))?;
            true
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
