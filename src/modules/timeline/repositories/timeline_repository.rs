use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::timeline::models::TimelineEvent;

/// Append-only storage for timeline events
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    async fn append(&self, event: &TimelineEvent) -> Result<()>;

    /// Events of one booking, newest first; ties keep reverse insertion order
    async fn list_for_booking(&self, booking_id: &str) -> Result<Vec<TimelineEvent>>;
}

pub struct MySqlTimelineRepository {
    pool: MySqlPool,
}

impl MySqlTimelineRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimelineRepository for MySqlTimelineRepository {
    async fn append(&self, event: &TimelineEvent) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO timeline_events (id, booking_id, event_type, title, note, added_by, occurred_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.id)
        .bind(&event.booking_id)
        .bind(event.event_type.as_str())
        .bind(&event.title)
        .bind(&event.note)
        .bind(&event.added_by)
        .bind(event.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_booking(&self, booking_id: &str) -> Result<Vec<TimelineEvent>> {
        let rows = sqlx::query_as::<_, TimelineEventRow>(
            r#"
            SELECT id, booking_id, event_type, title, note, added_by, occurred_at
            FROM timeline_events
            WHERE booking_id = ?
            ORDER BY occurred_at DESC, seq DESC
            "#,
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TimelineEventRow::into_event).collect()
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TimelineEventRow {
    id: String,
    booking_id: String,
    event_type: String,
    title: String,
    note: String,
    added_by: String,
    occurred_at: DateTime<Utc>,
}

impl TimelineEventRow {
    fn into_event(self) -> Result<TimelineEvent> {
        let event_type = self
            .event_type
            .parse()
            .map_err(|e: String| AppError::Internal(format!("Invalid timeline row: {}", e)))?;

        Ok(TimelineEvent {
            id: self.id,
            booking_id: self.booking_id,
            event_type,
            title: self.title,
            note: self.note,
            timestamp: self.occurred_at,
            added_by: self.added_by,
        })
    }
}
