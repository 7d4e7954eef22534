//! Stand-in for the remote API client.
//!
//! Serves canned JSON after a short delay so page mounts go through the same
//! await points a real fetch would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;
use vstrecha_core::cache::{EventsPatch, FeedPatch, ProfilePatch};
use vstrecha_core::models::{Event, EventRequest, FeedItem, Profile, RequestStatus};
use vstrecha_core::Domain;

/// Simulated network latency per request.
const FETCH_LATENCY_MS: u64 = 20;

const FEED_JSON: &str = r#"[
    {"id": 1, "title": "Настолки в антикафе", "description": null, "locationName": "Москва",
     "startDate": "2026-10-20T19:00:00+03:00", "authorName": "Ира", "imageUrl": null},
    {"id": 2, "title": "Утренняя пробежка", "description": "5 км по набережной", "locationName": "Москва",
     "startDate": "2026-10-21T08:00:00+03:00", "authorName": "Дима", "imageUrl": null}
]"#;

const EVENTS_JSON: &str = r#"[
    {"id": 10, "title": "Кино на крыше", "description": null, "locationName": "Москва",
     "startDate": "2026-10-24", "endDate": null, "maxParticipants": 8}
]"#;

const REQUESTS_JSON: &str = r#"[
    {"id": 100, "eventId": 10, "userId": 7, "userName": "Оля", "status": "accepted"},
    {"id": 101, "eventId": 10, "userId": 8, "userName": "Петя", "status": "pending"},
    {"id": 102, "eventId": 10, "userId": 9, "userName": null, "status": "pending"}
]"#;

const PROFILE_JSON: &str = r#"{
    "id": 42, "firstName": "Алексей", "lastName": null, "age": 29, "cityName": "Москва",
    "bio": "Люблю бег и кино", "interests": ["бег", "кино"], "photoUrls": []
}"#;

/// A completed fetch for one domain.
#[derive(Debug)]
pub enum FetchResult {
    Feed(FeedPatch),
    Events(EventsPatch),
    Profile(ProfilePatch),
}

/// Clone is cheap - the counters are shared.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    requests: Arc<AtomicUsize>,
    feed_cursor: Arc<AtomicUsize>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fetches issued so far.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub async fn fetch(self, domain: Domain) -> Result<FetchResult> {
        let n = self.requests.fetch_add(1, Ordering::SeqCst);
        debug!(%domain, request = n + 1, "Fetching");
        tokio::time::sleep(Duration::from_millis(FETCH_LATENCY_MS)).await;

        match domain {
            Domain::Feed => {
                let cursor = self.feed_cursor.fetch_add(1, Ordering::SeqCst);
                Self::fetch_feed(cursor).map(FetchResult::Feed)
            }
            Domain::Events => Self::fetch_events().map(FetchResult::Events),
            Domain::Profile => Self::fetch_profile().map(FetchResult::Profile),
        }
    }

    /// Each feed fetch advances to the next card; past the end the feed is exhausted.
    fn fetch_feed(cursor: usize) -> Result<FeedPatch> {
        let items: Vec<FeedItem> =
            serde_json::from_str(FEED_JSON).context("Failed to parse feed response")?;
        let item = items.get(cursor % (items.len() + 1)).cloned();
        let exhausted = item.is_none();
        Ok(FeedPatch::default()
            .current_item(item)
            .no_items_available(exhausted))
    }

    fn fetch_events() -> Result<EventsPatch> {
        let events: Vec<Event> =
            serde_json::from_str(EVENTS_JSON).context("Failed to parse events response")?;
        let requests: Vec<EventRequest> =
            serde_json::from_str(REQUESTS_JSON).context("Failed to parse requests response")?;

        let mut pending: HashMap<i64, u32> = HashMap::new();
        for request in requests.iter().filter(|r| r.status == RequestStatus::Pending) {
            *pending.entry(request.event_id).or_default() += 1;
        }
        let accepted = requests.into_iter().filter(|r| r.is_accepted()).collect();

        Ok(EventsPatch::default()
            .my_items(Some(events))
            .accepted_requests(Some(accepted))
            .pending_request_counts(Some(pending)))
    }

    fn fetch_profile() -> Result<ProfilePatch> {
        let profile: Profile =
            serde_json::from_str(PROFILE_JSON).context("Failed to parse profile response")?;
        Ok(ProfilePatch::default().profile_data(Some(profile)))
    }
}
