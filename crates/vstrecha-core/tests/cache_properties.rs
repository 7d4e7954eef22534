//! Integration tests for the page cache contract.
//!
//! All timing goes through `ManualClock` so staleness is checked at exact
//! offsets from the last update.

use std::collections::HashMap;

use chrono::Duration;
use vstrecha_core::cache::{
    EventsPatch, EventsState, FeedPatch, FeedState, ProfilePatch, ProfileState,
};
use vstrecha_core::models::{Event, EventRequest, FeedItem, FilterSet, Profile, RequestStatus};
use vstrecha_core::{CacheConfig, CacheScope, Clock, Domain, DomainCache, ManualClock, SlotState};

fn test_cache() -> (DomainCache<ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let cache = DomainCache::with_clock(CacheConfig::default(), clock.clone());
    (cache, clock)
}

fn feed_item(id: i64) -> FeedItem {
    FeedItem {
        id,
        title: format!("Встреча #{}", id),
        description: Some("Настолки в антикафе".to_string()),
        location_name: Some("Москва".to_string()),
        start_date: Some("2026-10-20T19:00:00+03:00".to_string()),
        author_name: Some("Ира".to_string()),
        image_url: None,
    }
}

fn event(id: i64) -> Event {
    Event {
        id,
        title: "Пробежка в парке".to_string(),
        description: None,
        location_name: Some("Парк Горького".to_string()),
        start_date: Some("2026-10-18".to_string()),
        end_date: None,
        max_participants: Some(6),
    }
}

fn profile() -> Profile {
    Profile {
        id: 42,
        first_name: "Алексей".to_string(),
        last_name: None,
        age: Some(29),
        city_name: Some("Москва".to_string()),
        bio: None,
        interests: vec!["бег".to_string(), "кино".to_string()],
        photo_urls: vec![],
    }
}

/// Fill every slot so independence checks have something to compare.
fn populate(cache: &mut DomainCache<ManualClock>) {
    cache.update_feed(FeedPatch::default().current_item(Some(feed_item(1))));
    cache.update_events(
        EventsPatch::default()
            .my_items(Some(vec![event(10)]))
            .accepted_requests(Some(vec![EventRequest {
                id: 100,
                event_id: 10,
                user_id: 7,
                user_name: Some("Оля".to_string()),
                status: RequestStatus::Accepted,
            }]))
            .pending_request_counts(Some(HashMap::from([(10, 3)]))),
    );
    cache.update_profile(ProfilePatch::default().profile_data(Some(profile())));
}

#[test]
fn test_update_is_visible_and_valid_immediately() {
    let (mut cache, clock) = test_cache();

    cache.update_feed(FeedPatch::default().current_item(Some(feed_item(5))));
    assert_eq!(cache.feed().payload.current_item, Some(feed_item(5)));
    assert_eq!(cache.feed().last_fetch_time, Some(clock.now()));
    assert!(cache.is_valid(Domain::Feed));

    cache.update_events(EventsPatch::default().my_items(Some(vec![event(1)])));
    assert_eq!(cache.events().payload.my_items, Some(vec![event(1)]));
    assert!(cache.is_valid(Domain::Events));

    cache.update_profile(ProfilePatch::default().profile_data(Some(profile())));
    assert_eq!(cache.profile().payload.profile_data, Some(profile()));
    assert!(cache.is_valid(Domain::Profile));
}

#[test]
fn test_clear_restores_defaults_and_invalidates() {
    let (mut cache, _clock) = test_cache();
    populate(&mut cache);

    for domain in Domain::ALL {
        cache.clear(domain);
        assert!(!cache.is_valid(domain));
        assert_eq!(cache.state(domain), SlotState::Empty);
    }

    assert_eq!(cache.feed().payload, FeedState::default());
    assert_eq!(cache.feed().payload.filters.location_name, "Москва");
    assert!(cache.feed().last_fetch_time.is_none());
    assert_eq!(cache.events().payload, EventsState::default());
    assert!(cache.events().last_fetch_time.is_none());
    assert_eq!(cache.profile().payload, ProfileState::default());
    assert!(cache.profile().last_fetch_time.is_none());
}

#[test]
fn test_staleness_boundary() {
    let (mut cache, clock) = test_cache();
    let ttl = cache.ttl();
    let t0 = clock.now();
    cache.update_profile(ProfilePatch::default().profile_data(Some(profile())));

    clock.set(t0 + ttl - Duration::milliseconds(1));
    assert!(cache.is_valid(Domain::Profile));

    clock.set(t0 + ttl);
    assert!(!cache.is_valid(Domain::Profile));
    assert_eq!(cache.state(Domain::Profile), SlotState::Stale);

    clock.set(t0 + ttl + Duration::hours(1));
    assert!(!cache.is_valid(Domain::Profile));
}

#[test]
fn test_stale_slot_becomes_fresh_after_update() {
    let (mut cache, clock) = test_cache();
    cache.update_events(EventsPatch::default().my_items(Some(vec![event(1)])));
    clock.advance(Duration::minutes(6));
    assert_eq!(cache.state(Domain::Events), SlotState::Stale);

    cache.update_events(EventsPatch::default());
    assert_eq!(cache.state(Domain::Events), SlotState::Fresh);
    assert_eq!(cache.events().payload.my_items, Some(vec![event(1)]));
    assert_eq!(cache.events().last_fetch_time, Some(clock.now()));
}

#[test]
fn test_read_does_not_touch_timestamp() {
    let (mut cache, clock) = test_cache();
    cache.update_feed(FeedPatch::default());
    let stamped = cache.feed().last_fetch_time;

    clock.advance(Duration::minutes(4));
    let _ = cache.feed();
    let _ = cache.is_valid(Domain::Feed);
    let _ = cache.cache_ages();
    assert_eq!(cache.feed().last_fetch_time, stamped);

    clock.advance(Duration::minutes(1));
    assert!(!cache.is_valid(Domain::Feed));
}

#[test]
fn test_validity_is_stable_between_calls() {
    let (mut cache, _clock) = test_cache();
    assert_eq!(cache.is_valid(Domain::Feed), cache.is_valid(Domain::Feed));

    cache.update_feed(FeedPatch::default());
    assert_eq!(cache.is_valid(Domain::Feed), cache.is_valid(Domain::Feed));
}

#[test]
fn test_feed_update_leaves_other_domains_alone() {
    let (mut cache, clock) = test_cache();
    populate(&mut cache);
    clock.advance(Duration::minutes(4));

    let events_before = cache.events().clone();
    let profile_before = cache.profile().clone();

    cache.update_feed(FeedPatch::default().no_items_available(true));
    assert_eq!(cache.events(), &events_before);
    assert_eq!(cache.profile(), &profile_before);

    clock.advance(Duration::minutes(1));
    assert!(cache.is_valid(Domain::Feed));
    assert!(!cache.is_valid(Domain::Events));
    assert!(!cache.is_valid(Domain::Profile));
}

#[test]
fn test_clear_leaves_other_domains_alone() {
    let (mut cache, _clock) = test_cache();
    populate(&mut cache);
    let feed_before = cache.feed().clone();
    let profile_before = cache.profile().clone();

    cache.clear_events();
    assert_eq!(cache.feed(), &feed_before);
    assert_eq!(cache.profile(), &profile_before);
    assert!(cache.is_feed_valid());
    assert!(cache.is_profile_valid());
}

#[test]
fn test_clear_is_idempotent() {
    let (mut cache, _clock) = test_cache();
    populate(&mut cache);

    cache.clear_feed();
    let once = cache.feed().clone();
    cache.clear_feed();
    assert_eq!(cache.feed(), &once);

    cache.clear_profile();
    cache.clear_profile();
    assert_eq!(cache.profile().payload, ProfileState::default());
}

#[test]
fn test_no_items_flag_merges_over_existing_feed() {
    let (mut cache, clock) = test_cache();
    let filters = FilterSet {
        location_name: "Санкт-Петербург".to_string(),
        start_date: Some("2026-10-17".to_string()),
        end_date: Some("2026-10-19".to_string()),
        filters_enabled: true,
    };
    cache.update_feed(
        FeedPatch::default()
            .current_item(Some(feed_item(9)))
            .filters(filters.clone())
            .no_items_available(false),
    );

    clock.advance(Duration::minutes(2));
    cache.update_feed(FeedPatch::default().no_items_available(true));

    let slot = cache.feed();
    assert_eq!(slot.payload.current_item, Some(feed_item(9)));
    assert_eq!(slot.payload.filters, filters);
    assert!(slot.payload.no_items_available);
    assert_eq!(slot.last_fetch_time, Some(clock.now()));
}

#[test]
fn test_empty_patch_only_refreshes_timestamp() {
    let (mut cache, clock) = test_cache();
    populate(&mut cache);
    let payload_before = cache.events().payload.clone();

    clock.advance(Duration::minutes(4));
    cache.update_events(EventsPatch::default());

    assert_eq!(cache.events().payload, payload_before);
    assert_eq!(cache.events().last_fetch_time, Some(clock.now()));
    assert_eq!(cache.events().payload.pending_for(10), 3);
}

#[test]
fn test_fresh_scope_profile_is_invalid() {
    let (cache, _clock) = test_cache();
    let scope = CacheScope::with_cache(cache);
    assert!(!scope.cache().is_valid(Domain::Profile));
    assert!(scope.cache().profile().last_fetch_time.is_none());
}

#[test]
fn test_custom_ttl_applies_to_every_domain() {
    let clock = ManualClock::default();
    let config = CacheConfig::with_ttl_ms(60_000).unwrap();
    let mut cache = DomainCache::with_clock(config, clock.clone());
    populate(&mut cache);

    clock.advance(Duration::seconds(59));
    assert!(!cache.any_stale());

    clock.advance(Duration::seconds(1));
    for domain in Domain::ALL {
        assert!(!cache.is_valid(domain));
    }
}
