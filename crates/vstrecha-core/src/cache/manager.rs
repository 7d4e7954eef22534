use chrono::Duration;
use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;

use super::domain::{
    Domain, EventsPatch, EventsState, FeedPatch, FeedState, ProfilePatch, ProfileState,
};
use super::slot::{CacheSlot, SlotState};

/// In-memory page cache: one slot per domain, one TTL for all of them.
///
/// Page views check `is_valid` on mount; if the slot is fresh they render
/// from it, otherwise they fetch and write the result back with the
/// matching `update_*` call, which stamps the fetch time.
///
/// The cache never cancels anything. A view that unmounts while its fetch
/// is in flight must drop the result itself rather than write it here.
#[derive(Debug)]
pub struct DomainCache<C: Clock = SystemClock> {
    feed: CacheSlot<FeedState>,
    events: CacheSlot<EventsState>,
    profile: CacheSlot<ProfileState>,
    ttl: Duration,
    clock: C,
}

impl DomainCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(CacheConfig::default(), SystemClock)
    }
}

impl Default for DomainCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DomainCache<C> {
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            feed: CacheSlot::default(),
            events: CacheSlot::default(),
            profile: CacheSlot::default(),
            ttl: config.ttl(),
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ===== Feed =====

    pub fn feed(&self) -> &CacheSlot<FeedState> {
        &self.feed
    }

    pub fn update_feed(&mut self, patch: FeedPatch) {
        self.feed.update(patch, self.clock.now());
        debug!(domain = %Domain::Feed, "Cache slot updated");
    }

    pub fn clear_feed(&mut self) {
        self.clear(Domain::Feed);
    }

    pub fn is_feed_valid(&self) -> bool {
        self.is_valid(Domain::Feed)
    }

    // ===== Events =====

    pub fn events(&self) -> &CacheSlot<EventsState> {
        &self.events
    }

    pub fn update_events(&mut self, patch: EventsPatch) {
        self.events.update(patch, self.clock.now());
        debug!(domain = %Domain::Events, "Cache slot updated");
    }

    pub fn clear_events(&mut self) {
        self.clear(Domain::Events);
    }

    pub fn is_events_valid(&self) -> bool {
        self.is_valid(Domain::Events)
    }

    // ===== Profile =====

    pub fn profile(&self) -> &CacheSlot<ProfileState> {
        &self.profile
    }

    pub fn update_profile(&mut self, patch: ProfilePatch) {
        self.profile.update(patch, self.clock.now());
        debug!(domain = %Domain::Profile, "Cache slot updated");
    }

    pub fn clear_profile(&mut self) {
        self.clear(Domain::Profile);
    }

    pub fn is_profile_valid(&self) -> bool {
        self.is_valid(Domain::Profile)
    }

    // ===== Any domain =====

    pub fn clear(&mut self, domain: Domain) {
        match domain {
            Domain::Feed => self.feed.clear(),
            Domain::Events => self.events.clear(),
            Domain::Profile => self.profile.clear(),
        }
        debug!(%domain, "Cache slot cleared");
    }

    /// Drop every snapshot, e.g. on sign-out.
    pub fn clear_all(&mut self) {
        for domain in Domain::ALL {
            self.clear(domain);
        }
    }

    pub fn state(&self, domain: Domain) -> SlotState {
        let now = self.clock.now();
        match domain {
            Domain::Feed => self.feed.state(now, self.ttl),
            Domain::Events => self.events.state(now, self.ttl),
            Domain::Profile => self.profile.state(now, self.ttl),
        }
    }

    pub fn is_valid(&self, domain: Domain) -> bool {
        let state = self.state(domain);
        trace!(%domain, ?state, "Cache validity checked");
        state == SlotState::Fresh
    }

    /// True if any domain would need a refetch.
    pub fn any_stale(&self) -> bool {
        Domain::ALL.iter().any(|&domain| !self.is_valid(domain))
    }

    pub fn cache_ages(&self) -> CacheAges {
        let now = self.clock.now();
        CacheAges {
            feed: self.feed.age_display(now),
            events: self.events.age_display(now),
            profile: self.profile.age_display(now),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheAges {
    pub feed: Option<String>,
    pub events: Option<String>,
    pub profile: Option<String>,
}

impl CacheAges {
    pub fn get(&self, domain: Domain) -> Option<&str> {
        match domain {
            Domain::Feed => self.feed.as_deref(),
            Domain::Events => self.events.as_deref(),
            Domain::Profile => self.profile.as_deref(),
        }
    }

    pub fn display(&self, domain: Domain) -> String {
        self.get(domain).unwrap_or("never").to_string()
    }

    /// First available age in domain order, or "never".
    pub fn last_updated(&self) -> String {
        Domain::ALL
            .iter()
            .find_map(|&domain| self.get(domain))
            .unwrap_or("never")
            .to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================
