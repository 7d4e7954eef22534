//! vstrecha - page cache navigation simulator.
//!
//! Replays a script of page visits against the in-memory page cache, using
//! a simulated clock and a canned fetch layer, and prints which visits were
//! served from cache and which went to the network.

mod app;
mod fetch;
mod script;

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vstrecha_core::{CacheConfig, Config};

use app::App;
use script::Cli;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// `--ttl-ms` wins over the config file; an unreadable config falls back to defaults.
fn resolve_cache_config(cli: &Cli) -> Result<CacheConfig> {
    if let Some(ttl_ms) = cli.ttl_ms {
        return Ok(CacheConfig::with_ttl_ms(ttl_ms)?);
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Failed to load config, using defaults");
            Config::default()
        }
    };
    Ok(config.cache()?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    let cache_config = resolve_cache_config(&cli)?;
    let script = cli.script();
    info!(ttl_ms = cache_config.ttl_ms(), steps = script.len(), "Starting simulation");

    let mut app = App::new(cache_config);
    for step in script {
        println!("{}", app.run_step(step).await?);
    }

    println!();
    for line in app.summary() {
        println!("{}", line);
    }
    println!("{} requests made", app.request_count());

    if cli.dump {
        println!("{}", app.snapshot_json()?);
    }

    Ok(())
}
