//! Data models for vstrecha entities.
//!
//! These are the shapes the fetch layer hands to page views and that the
//! page cache stores:
//!
//! - `FeedItem`, `FilterSet`: the swipe feed card and its search filters
//! - `Event`, `EventRequest`: the user's own events and join requests
//! - `Profile`: the signed-in user's profile

pub mod event;
pub mod feed;
pub mod profile;

pub use event::{Event, EventRequest, RequestStatus};
pub use feed::{FeedItem, FilterSet, DEFAULT_LOCATION};
pub use profile::Profile;
