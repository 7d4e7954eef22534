//! Simulated page views driving the page cache.
//!
//! Every view follows the same mount cycle: check the domain's slot, render
//! from it when fresh, otherwise fetch and write the result back. Fetches
//! carry a `FetchGuard` so a result that lands after its view unmounted is
//! dropped instead of written.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info};
use vstrecha_core::{CacheConfig, CacheScope, Clock, Domain, DomainCache, ManualClock};

use crate::fetch::{FakeApi, FetchResult};
use crate::script::Step;

/// What happened when a page was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Rendered from a fresh slot, no request made.
    Hit,
    /// Fetched and stored.
    Fetched,
    /// Fetched, but the view was gone by the time it completed.
    Discarded,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Hit => write!(f, "hit"),
            Outcome::Fetched => write!(f, "fetched"),
            Outcome::Discarded => write!(f, "discarded"),
        }
    }
}

/// Identifies one mount of a view. Stale once the view remounts or unmounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchGuard {
    domain: Domain,
    generation: u64,
}

pub struct App {
    scope: CacheScope<ManualClock>,
    clock: ManualClock,
    api: FakeApi,
    started_at: DateTime<Utc>,
    generations: HashMap<Domain, u64>,
}

impl App {
    pub fn new(config: CacheConfig) -> Self {
        let clock = ManualClock::new(Utc::now());
        let cache = DomainCache::with_clock(config, clock.clone());
        Self {
            scope: CacheScope::with_cache(cache),
            started_at: clock.now(),
            clock,
            api: FakeApi::new(),
            generations: HashMap::new(),
        }
    }

    pub fn cache(&self) -> &DomainCache<ManualClock> {
        self.scope.cache()
    }

    pub fn request_count(&self) -> usize {
        self.api.request_count()
    }

    fn elapsed_secs(&self) -> i64 {
        (self.clock.now() - self.started_at).num_seconds()
    }

    fn mount(&mut self, domain: Domain) -> FetchGuard {
        let generation = self.generations.entry(domain).or_default();
        *generation += 1;
        FetchGuard {
            domain,
            generation: *generation,
        }
    }

    fn unmount(&mut self, domain: Domain) {
        *self.generations.entry(domain).or_default() += 1;
    }

    fn is_current(&self, guard: &FetchGuard) -> bool {
        self.generations.get(&guard.domain) == Some(&guard.generation)
    }

    /// Open a page and stay on it until its data is in.
    pub async fn visit(&mut self, domain: Domain) -> Result<Outcome> {
        if self.scope.cache().is_valid(domain) {
            info!(%domain, "Serving page from cache");
            return Ok(Outcome::Hit);
        }

        let guard = self.mount(domain);
        let result = self.api.clone().fetch(domain).await?;
        Ok(self.complete(guard, result))
    }

    /// Open a page and navigate away while its fetch is in flight.
    pub async fn abort(&mut self, domain: Domain) -> Result<Outcome> {
        if self.scope.cache().is_valid(domain) {
            return Ok(Outcome::Hit);
        }

        let guard = self.mount(domain);
        let handle = tokio::spawn(self.api.clone().fetch(domain));
        self.unmount(domain);

        let result = handle.await.context("Fetch task failed")??;
        Ok(self.complete(guard, result))
    }

    fn complete(&mut self, guard: FetchGuard, result: FetchResult) -> Outcome {
        if !self.is_current(&guard) {
            debug!(domain = %guard.domain, "View unmounted before fetch completed, dropping result");
            return Outcome::Discarded;
        }

        let cache = self.scope.cache_mut();
        match result {
            FetchResult::Feed(patch) => cache.update_feed(patch),
            FetchResult::Events(patch) => cache.update_events(patch),
            FetchResult::Profile(patch) => cache.update_profile(patch),
        }
        Outcome::Fetched
    }

    /// Run one script step and describe what happened.
    pub async fn run_step(&mut self, step: Step) -> Result<String> {
        let at = self.elapsed_secs();
        let line = match step {
            Step::Visit(domain) => {
                let outcome = self.visit(domain).await?;
                format!("[{:>4}s] open {:<8} {}", at, domain, outcome)
            }
            Step::Abort(domain) => {
                let outcome = self.abort(domain).await?;
                format!("[{:>4}s] leave {:<7} {}", at, domain, outcome)
            }
            Step::Wait(secs) => {
                let by = i64::try_from(secs)
                    .ok()
                    .and_then(chrono::Duration::try_seconds)
                    .with_context(|| format!("Wait of {}s is out of range", secs))?;
                self.clock
                    .try_advance(by)
                    .with_context(|| format!("Wait of {}s overflows the simulated clock", secs))?;
                format!("[{:>4}s] wait {}s", at, secs)
            }
            Step::Clear(domain) => {
                self.scope.cache_mut().clear(domain);
                format!("[{:>4}s] clear {}", at, domain)
            }
            Step::ClearAll => {
                self.scope.cache_mut().clear_all();
                format!("[{:>4}s] clear all", at)
            }
        };
        Ok(line)
    }

    /// Per-domain validity, age and what the page would show.
    pub fn summary(&self) -> Vec<String> {
        let cache = self.cache();
        let ages = cache.cache_ages();
        Domain::ALL
            .iter()
            .map(|&domain| {
                format!(
                    "{:<8} {:<6} updated {:<10} {}",
                    domain,
                    if cache.is_valid(domain) { "fresh" } else { "stale" },
                    ages.display(domain),
                    self.page_content(domain)
                )
            })
            .collect()
    }

    /// One-line rendering of a domain's cached payload.
    pub fn page_content(&self, domain: Domain) -> String {
        let cache = self.cache();
        match domain {
            Domain::Feed => {
                let feed = &cache.feed().payload;
                let card = match &feed.current_item {
                    Some(item) => format!("\"{}\" {}", item.title, item.formatted_date()),
                    None if feed.no_items_available => "no more cards".to_string(),
                    None => "-".to_string(),
                };
                if feed.filters.is_customized() {
                    format!("{} (filtered: {})", card, feed.filters.location_name)
                } else {
                    card
                }
            }
            Domain::Events => {
                let events = &cache.events().payload;
                match &events.my_items {
                    Some(items) => {
                        let pending: u32 = items.iter().map(|e| events.pending_for(e.id)).sum();
                        format!("{} events, {} pending requests", items.len(), pending)
                    }
                    None => "-".to_string(),
                }
            }
            Domain::Profile => cache
                .profile()
                .payload
                .profile_data
                .as_ref()
                .map(|p| p.display_name())
                .unwrap_or_else(|| "-".to_string()),
        }
    }

    /// The cached payloads as JSON, as a front end would receive them.
    pub fn snapshot_json(&self) -> Result<String> {
        let cache = self.cache();
        let snapshot = json!({
            "feed": cache.feed(),
            "events": cache.events(),
            "profile": cache.profile(),
        });
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}
