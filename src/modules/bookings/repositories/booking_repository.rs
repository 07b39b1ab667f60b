use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::bookings::models::{Booking, BookingStatus, CustomerContact, Location};

/// Storage for bookings
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &Booking) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>>;

    /// All bookings, newest first
    async fn list_all(&self) -> Result<Vec<Booking>>;

    /// Bookings owned by one user, newest first
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>>;

    /// Returns false when no booking has this id
    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    async fn count(&self) -> Result<i64>;

    /// Sum of `total_cost` over completed bookings
    async fn completed_revenue(&self) -> Result<Decimal>;
}

pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, service_id, service_slug, service_name,
           duration_unit, duration_value, per_unit_rate, total_cost, currency,
           division, district, city, area, address,
           customer_name, customer_email, customer_phone,
           status, created_at, updated_at
    FROM bookings
"#;

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn insert(&self, booking: &Booking) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, service_id, service_slug, service_name,
                duration_unit, duration_value, per_unit_rate, total_cost, currency,
                division, district, city, area, address,
                customer_name, customer_email, customer_phone,
                status, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&booking.id)
        .bind(&booking.user_id)
        .bind(&booking.service_id)
        .bind(&booking.service_slug)
        .bind(&booking.service_name)
        .bind(booking.duration_unit.as_str())
        .bind(booking.duration_value)
        .bind(booking.per_unit_rate)
        .bind(booking.total_cost)
        .bind(booking.currency.as_str())
        .bind(&booking.location.division)
        .bind(&booking.location.district)
        .bind(&booking.location.city)
        .bind(&booking.location.area)
        .bind(&booking.location.address)
        .bind(&booking.customer.name)
        .bind(&booking.customer.email)
        .bind(&booking.customer.phone)
        .bind(booking.status.as_str())
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(BookingRow::into_booking).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{} ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{} WHERE user_id = ? ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(BookingRow::into_booking).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        // Affected rows can be 0 for a no-op write on an existing row
        if result.rows_affected() > 0 {
            return Ok(true);
        }
        let exists: Option<String> = sqlx::query_scalar("SELECT id FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(exists.is_some())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn completed_revenue(&self) -> Result<Decimal> {
        let revenue: Option<Decimal> = sqlx::query_scalar(
            "SELECT SUM(total_cost) FROM bookings WHERE status = 'COMPLETED'",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(revenue.unwrap_or_default().normalize())
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: String,
    user_id: Option<String>,
    service_id: String,
    service_slug: String,
    service_name: String,
    duration_unit: String,
    duration_value: u32,
    per_unit_rate: Decimal,
    total_cost: Decimal,
    currency: String,
    division: String,
    district: String,
    city: String,
    area: String,
    address: String,
    customer_name: String,
    customer_email: String,
    customer_phone: Option<String>,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BookingRow {
    fn into_booking(self) -> Result<Booking> {
        let invalid = |e: String| AppError::Internal(format!("Invalid booking row: {}", e));

        Ok(Booking {
            duration_unit: self.duration_unit.parse().map_err(invalid)?,
            currency: self.currency.parse().map_err(invalid)?,
            status: self.status.parse().map_err(invalid)?,
            per_unit_rate: self.per_unit_rate.normalize(),
            total_cost: self.total_cost.normalize(),
            location: Location {
                division: self.division,
                district: self.district,
                city: self.city,
                area: self.area,
                address: self.address,
            },
            customer: CustomerContact {
                name: self.customer_name,
                email: self.customer_email,
                phone: self.customer_phone,
            },
            id: self.id,
            user_id: self.user_id,
            service_id: self.service_id,
            service_slug: self.service_slug,
            service_name: self.service_name,
            duration_value: self.duration_value,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
