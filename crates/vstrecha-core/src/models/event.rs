use serde::{Deserialize, Serialize};

/// Lifecycle of a request to join someone's event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "Pending"),
            RequestStatus::Accepted => write!(f, "Accepted"),
            RequestStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "locationName")]
    pub location_name: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "maxParticipants")]
    pub max_participants: Option<u32>,
}

/// A request by another user to join one of the current user's events,
/// or by the current user to join someone else's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EventRequest {
    pub id: i64,
    #[serde(rename = "eventId")]
    pub event_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "userName")]
    pub user_name: Option<String>,
    pub status: RequestStatus,
}

impl EventRequest {
    pub fn is_accepted(&self) -> bool {
        self.status == RequestStatus::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_status_wire_format() {
        let json = r#"{"id":7,"eventId":3,"userId":42,"userName":null,"status":"accepted"}"#;
        let request: EventRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, RequestStatus::Accepted);
        assert!(request.is_accepted());
        assert_eq!(request.status.to_string(), "Accepted");
    }
}
