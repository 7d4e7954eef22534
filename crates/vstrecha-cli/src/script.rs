//! Command-line parsing for the navigation simulator.
//!
//! Arguments are parsed with clap; each positional argument is one script
//! step such as `feed`, `wait:300` or `clear:profile`.

use clap::Parser;
use thiserror::Error;
use vstrecha_core::Domain;

/// Longest simulated pause a single `wait` step accepts (one year).
/// Keeps the simulated clock far away from chrono's representable range.
pub const MAX_WAIT_SECS: u64 = 365 * 24 * 60 * 60;

/// Error types for script step parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("Unknown step: '{0}'. Valid steps: feed, events, profile, wait:<secs>, clear:<domain>, clear-all, abort:<domain>")]
    UnknownStep(String),

    #[error("Invalid wait duration: '{0}' (expected whole seconds, at most {max})", max = MAX_WAIT_SECS)]
    InvalidWait(String),
}

/// One user action in a simulated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Open a page: serve from cache if fresh, else fetch and store.
    Visit(Domain),
    /// Open a page and leave before its fetch completes.
    Abort(Domain),
    /// Let simulated time pass.
    Wait(u64),
    Clear(Domain),
    ClearAll,
}

/// Walks through a cache hit, a stale refetch and an explicit clear.
pub const DEFAULT_SCRIPT: &[Step] = &[
    Step::Visit(Domain::Feed),
    Step::Visit(Domain::Events),
    Step::Visit(Domain::Feed),
    Step::Wait(200),
    Step::Visit(Domain::Profile),
    Step::Visit(Domain::Events),
    Step::Wait(120),
    Step::Visit(Domain::Feed),
    Step::Visit(Domain::Profile),
    Step::Abort(Domain::Events),
    Step::Visit(Domain::Events),
    Step::Clear(Domain::Profile),
    Step::Visit(Domain::Profile),
];

impl Step {
    /// Parse a step; the action prefix and the domain are case-insensitive.
    pub fn parse(s: &str) -> Result<Self, CliError> {
        let lower = s.to_ascii_lowercase();
        if lower == "clear-all" {
            return Ok(Step::ClearAll);
        }

        let domain = |name: &str| {
            name.parse::<Domain>()
                .map_err(|_| CliError::UnknownStep(s.to_string()))
        };

        match lower.split_once(':') {
            None => Ok(Step::Visit(domain(&lower)?)),
            Some(("wait", secs)) => parse_wait(secs).map(Step::Wait),
            Some(("clear", name)) => Ok(Step::Clear(domain(name)?)),
            Some(("abort", name)) => Ok(Step::Abort(domain(name)?)),
            Some(_) => Err(CliError::UnknownStep(s.to_string())),
        }
    }
}

fn parse_wait(secs: &str) -> Result<u64, CliError> {
    match secs.parse::<u64>() {
        Ok(value) if value <= MAX_WAIT_SECS => Ok(value),
        _ => Err(CliError::InvalidWait(secs.to_string())),
    }
}

/// vstrecha - replay page visits against the in-memory page cache
#[derive(Parser, Debug)]
#[command(name = "vstrecha")]
#[command(about = "Page cache navigation simulator")]
#[command(version)]
pub struct Cli {
    /// Cache TTL in milliseconds (overrides the config file)
    #[arg(long, value_name = "MS")]
    pub ttl_ms: Option<u64>,

    /// Print the cached payloads as JSON at the end
    #[arg(long)]
    pub dump: bool,

    /// Script steps to replay; a built-in demo script runs when none are given
    ///
    /// Steps: feed, events, profile, wait:<secs>, clear:<domain>, clear-all, abort:<domain>
    #[arg(value_name = "STEP", value_parser = Step::parse)]
    pub steps: Vec<Step>,
}

impl Cli {
    /// The steps to run, falling back to `DEFAULT_SCRIPT`.
    pub fn script(&self) -> Vec<Step> {
        if self.steps.is_empty() {
            DEFAULT_SCRIPT.to_vec()
        } else {
            self.steps.clone()
        }
    }
}
