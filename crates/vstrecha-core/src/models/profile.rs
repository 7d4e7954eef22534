use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    pub age: Option<u8>,
    #[serde(rename = "cityName")]
    pub city_name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(rename = "photoUrls", default)]
    pub photo_urls: Vec<String>,
}

impl Profile {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}
