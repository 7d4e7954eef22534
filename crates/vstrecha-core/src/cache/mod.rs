//! In-memory page cache shared by the feed, events and profile views.
//!
//! Each domain gets one `CacheSlot` holding its last fetched payload and the
//! fetch time. A slot is served while younger than the TTL (5 minutes by
//! default) and refetched otherwise. Slots are independent of each other.

pub mod domain;
pub mod manager;
pub mod scope;
pub mod slot;

pub use domain::{
    Domain, EventsPatch, EventsState, FeedPatch, FeedState, PendingRequestCounts, ProfilePatch,
    ProfileState,
};
pub use manager::{CacheAges, DomainCache};
pub use scope::CacheScope;
pub use slot::{CacheSlot, Patchable, SlotState};
