use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Arrival,
    Feeding,
    Medication,
    Activity,
    Departure,
    #[default]
    Update,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Arrival => "arrival",
            EventType::Feeding => "feeding",
            EventType::Medication => "medication",
            EventType::Activity => "activity",
            EventType::Departure => "departure",
            EventType::Update => "update",
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arrival" => Ok(EventType::Arrival),
            "feeding" => Ok(EventType::Feeding),
            "medication" => Ok(EventType::Medication),
            "activity" => Ok(EventType::Activity),
            "departure" => Ok(EventType::Departure),
            "update" => Ok(EventType::Update),
            _ => Err(format!("Invalid event type: {}", s)),
        }
    }
}

/// One entry in a booking's care log. Never edited once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub booking_id: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub title: String,
    pub note: String,
    pub timestamp: DateTime<Utc>,
    pub added_by: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEventRequest {
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    pub title: Option<String>,
    pub note: Option<String>,
    pub added_by: Option<String>,
}
