//! Per-domain payloads, their defaults and their partial updates.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::models::{Event, EventRequest, FeedItem, FilterSet, Profile};

use super::slot::Patchable;

/// One of the independently cached data areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Feed,
    Events,
    Profile,
}

impl Domain {
    pub const ALL: [Domain; 3] = [Domain::Feed, Domain::Events, Domain::Profile];
}

impl FromStr for Domain {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "feed" => Ok(Domain::Feed),
            "events" => Ok(Domain::Events),
            "profile" => Ok(Domain::Profile),
            _ => Err(CacheError::UnknownDomain(s.to_string())),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Domain::Feed => "feed",
            Domain::Events => "events",
            Domain::Profile => "profile",
        };
        f.pad(name)
    }
}

// ===== Feed =====

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FeedState {
    #[serde(rename = "currentItem")]
    pub current_item: Option<FeedItem>,
    pub filters: FilterSet,
    #[serde(rename = "noItemsAvailable", default)]
    pub no_items_available: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FeedPatch {
    pub current_item: Option<Option<FeedItem>>,
    pub filters: Option<FilterSet>,
    pub no_items_available: Option<bool>,
}

impl FeedPatch {
    pub fn current_item(mut self, item: Option<FeedItem>) -> Self {
        self.current_item = Some(item);
        self
    }

    pub fn filters(mut self, filters: FilterSet) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn no_items_available(mut self, value: bool) -> Self {
        self.no_items_available = Some(value);
        self
    }
}

impl Patchable for FeedState {
    type Patch = FeedPatch;

    fn apply(&mut self, patch: FeedPatch) {
        if let Some(item) = patch.current_item {
            self.current_item = item;
        }
        if let Some(filters) = patch.filters {
            self.filters = filters;
        }
        if let Some(value) = patch.no_items_available {
            self.no_items_available = value;
        }
    }
}

// ===== Events =====

/// Pending join requests per event id.
pub type PendingRequestCounts = HashMap<i64, u32>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EventsState {
    #[serde(rename = "myItems")]
    pub my_items: Option<Vec<Event>>,
    #[serde(rename = "acceptedRequests")]
    pub accepted_requests: Option<Vec<EventRequest>>,
    #[serde(rename = "pendingRequestCounts")]
    pub pending_request_counts: Option<PendingRequestCounts>,
}

impl EventsState {
    pub fn pending_for(&self, event_id: i64) -> u32 {
        self.pending_request_counts
            .as_ref()
            .and_then(|counts| counts.get(&event_id).copied())
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventsPatch {
    pub my_items: Option<Option<Vec<Event>>>,
    pub accepted_requests: Option<Option<Vec<EventRequest>>>,
    pub pending_request_counts: Option<Option<PendingRequestCounts>>,
}

impl EventsPatch {
    pub fn my_items(mut self, items: Option<Vec<Event>>) -> Self {
        self.my_items = Some(items);
        self
    }

    pub fn accepted_requests(mut self, requests: Option<Vec<EventRequest>>) -> Self {
        self.accepted_requests = Some(requests);
        self
    }

    pub fn pending_request_counts(mut self, counts: Option<PendingRequestCounts>) -> Self {
        self.pending_request_counts = Some(counts);
        self
    }
}

impl Patchable for EventsState {
    type Patch = EventsPatch;

    fn apply(&mut self, patch: EventsPatch) {
        if let Some(items) = patch.my_items {
            self.my_items = items;
        }
        if let Some(requests) = patch.accepted_requests {
            self.accepted_requests = requests;
        }
        if let Some(counts) = patch.pending_request_counts {
            self.pending_request_counts = counts;
        }
    }
}

// ===== Profile =====

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ProfileState {
    #[serde(rename = "profileData")]
    pub profile_data: Option<Profile>,
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub profile_data: Option<Option<Profile>>,
}

impl ProfilePatch {
    pub fn profile_data(mut self, profile: Option<Profile>) -> Self {
        self.profile_data = Some(profile);
        self
    }
}

impl Patchable for ProfileState {
    type Patch = ProfilePatch;

    fn apply(&mut self, patch: ProfilePatch) {
        if let Some(profile) = patch.profile_data {
            self.profile_data = profile;
        }
    }
}
