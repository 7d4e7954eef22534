//! Core library for vstrecha.
//!
//! Holds the domain models and the in-memory page cache that sits between
//! page views and the remote fetch layer.

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;

pub use cache::{CacheScope, CacheSlot, Domain, DomainCache, SlotState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{CacheConfig, Config, CACHE_TTL_MS};
pub use error::CacheError;
