use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// City the feed filters fall back to when nothing else is chosen.
pub const DEFAULT_LOCATION: &str = "Москва";

/// A single card shown in the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FeedItem {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "locationName")]
    pub location_name: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "authorName")]
    pub author_name: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl FeedItem {
    pub fn formatted_date(&self) -> String {
        match &self.start_date {
            Some(date) => {
                if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
                    dt.format("%d.%m.%Y").to_string()
                } else {
                    date.chars().take(10).collect()
                }
            }
            None => "TBD".to_string(),
        }
    }
}

/// Search filters applied to the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct FilterSet {
    #[serde(rename = "locationName")]
    pub location_name: String,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "filtersEnabled", default)]
    pub filters_enabled: bool,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self {
            location_name: DEFAULT_LOCATION.to_string(),
            start_date: None,
            end_date: None,
            filters_enabled: false,
        }
    }
}

impl FilterSet {
    /// True when any filter differs from the defaults.
    pub fn is_customized(&self) -> bool {
        self != &Self::default()
    }
}
