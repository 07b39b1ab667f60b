use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::bookings::repositories::BookingRepository;
use crate::modules::timeline::models::{AddEventRequest, EventType, TimelineEvent};
use crate::modules::timeline::repositories::TimelineRepository;

const DEFAULT_AUTHOR: &str = "Caregiver";
const MAX_TITLE_LEN: usize = 200;

/// Demo entries written by `seed_if_empty`, oldest first
const SEED_EVENTS: [(EventType, &str, &str); 3] = [
    (
        EventType::Arrival,
        "Caregiver Arrived",
        "Arrived on time and greeted the family.",
    ),
    (
        EventType::Activity,
        "Morning Walk",
        "30-minute walk in the garden.",
    ),
    (
        EventType::Feeding,
        "Lunch Served",
        "Healthy meal as per dietary guidelines.",
    ),
];

/// Service for the per-booking care timeline
pub struct TimelineService {
    events: Arc<dyn TimelineRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl TimelineService {
    pub fn new(events: Arc<dyn TimelineRepository>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { events, bookings }
    }

    /// Append an event stamped with the current time
    pub async fn add_event(&self, booking_id: &str, request: AddEventRequest) -> Result<TimelineEvent> {
        self.ensure_booking(booking_id).await?;

        let title = request
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::validation("Event title is required."))?;
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(AppError::validation("Event title is too long."));
        }

        let added_by = request
            .added_by
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AUTHOR);

        let event = TimelineEvent {
            id: Uuid::new_v4().to_string(),
            booking_id: booking_id.to_string(),
            event_type: request.event_type.unwrap_or_default(),
            title: title.to_string(),
            note: request.note.unwrap_or_default(),
            timestamp: Utc::now(),
            added_by: added_by.to_string(),
        };

        self.events.append(&event).await?;
        info!(
            booking_id = %booking_id,
            event_type = event.event_type.as_str(),
            "Timeline event added"
        );

        Ok(event)
    }

    /// Events newest first
    pub async fn list_events(&self, booking_id: &str) -> Result<Vec<TimelineEvent>> {
        self.ensure_booking(booking_id).await?;
        self.events.list_for_booking(booking_id).await
    }

    /// Write the demo events when the timeline is empty, then list it
    pub async fn seed_if_empty(&self, booking_id: &str) -> Result<Vec<TimelineEvent>> {
        let existing = self.list_events(booking_id).await?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        for (event_type, title, note) in SEED_EVENTS {
            self.add_event(
                booking_id,
                AddEventRequest {
                    event_type: Some(event_type),
                    title: Some(title.to_string()),
                    note: Some(note.to_string()),
                    added_by: None,
                },
            )
            .await?;
        }

        self.events.list_for_booking(booking_id).await
    }

    async fn ensure_booking(&self, booking_id: &str) -> Result<()> {
        if self.bookings.find_by_id(booking_id).await?.is_none() {
            return Err(AppError::not_found("Booking not found."));
        }
        Ok(())
    }
}
