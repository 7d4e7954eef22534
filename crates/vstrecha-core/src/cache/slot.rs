use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A payload that can absorb a partial update.
///
/// Fields set on the patch replace the payload's fields; fields left unset
/// are preserved. Merging is shallow: a nested value is replaced whole.
pub trait Patchable: Default {
    type Patch: Default;

    fn apply(&mut self, patch: Self::Patch);
}

/// Where a slot is in its lifecycle relative to the TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Never fetched, or cleared since.
    Empty,
    Fresh,
    Stale,
}

/// Cached payload for a single domain plus the time it was last fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheSlot<T> {
    pub payload: T,
    pub last_fetch_time: Option<DateTime<Utc>>,
}

impl<T: Default> Default for CacheSlot<T> {
    fn default() -> Self {
        Self {
            payload: T::default(),
            last_fetch_time: None,
        }
    }
}

impl<T: Patchable> CacheSlot<T> {
    /// Merge `patch` into the payload and stamp the fetch time.
    /// An empty patch only refreshes the timestamp.
    pub fn update(&mut self, patch: T::Patch, now: DateTime<Utc>) {
        self.payload.apply(patch);
        self.last_fetch_time = Some(now);
    }

    /// Reset to the domain default with no fetch time.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl<T> CacheSlot<T> {
    /// Valid iff fetched and younger than `ttl`. At exactly `ttl` the slot is stale.
    pub fn is_valid(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.state(now, ttl) == SlotState::Fresh
    }

    pub fn state(&self, now: DateTime<Utc>, ttl: Duration) -> SlotState {
        match self.last_fetch_time {
            None => SlotState::Empty,
            Some(fetched) if now - fetched < ttl => SlotState::Fresh,
            Some(_) => SlotState::Stale,
        }
    }

    pub fn age(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.last_fetch_time.map(|fetched| now - fetched)
    }

    pub fn age_display(&self, now: DateTime<Utc>) -> Option<String> {
        self.age(now).map(|age| format_age(age.num_minutes()))
    }
}

fn format_age(minutes: i64) -> String {
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        let remaining_mins = minutes % 60;
        if remaining_mins >= 30 {
            // Round up: 1h 30m+ becomes 2h
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        let remaining_hours = (minutes % 1440) / 60;
        if remaining_hours >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}
