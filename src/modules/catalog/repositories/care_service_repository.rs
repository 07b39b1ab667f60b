use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::{CareService, Pricing};

/// Storage for the service catalog
#[async_trait]
pub trait CareServiceRepository: Send + Sync {
    /// Insert a service. Fails with `Conflict` when the slug is taken.
    async fn insert(&self, service: &CareService) -> Result<()>;

    /// Overwrite every mutable column of an existing service
    async fn update(&self, service: &CareService) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<CareService>>;

    /// Any status; callers decide whether inactive services count
    async fn find_by_slug(&self, slug: &str) -> Result<Option<CareService>>;

    /// Services ordered by name, optionally only active ones
    async fn list(&self, active_only: bool) -> Result<Vec<CareService>>;

    async fn count(&self) -> Result<i64>;
}

pub struct MySqlCareServiceRepository {
    pool: MySqlPool,
}

impl MySqlCareServiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, slug, name, base_rate, rate_unit, currency, status,
           label, icon, tagline, short_description, description,
           created_at, updated_at
    FROM care_services
"#;

#[async_trait]
impl CareServiceRepository for MySqlCareServiceRepository {
    async fn insert(&self, service: &CareService) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO care_services (
                id, slug, name, base_rate, rate_unit, currency, status,
                label, icon, tagline, short_description, description,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.id)
        .bind(&service.slug)
        .bind(&service.name)
        .bind(service.pricing.base_rate)
        .bind(service.pricing.unit.as_str())
        .bind(service.pricing.currency.as_str())
        .bind(service.status.as_str())
        .bind(&service.label)
        .bind(&service.icon)
        .bind(&service.tagline)
        .bind(&service.short_description)
        .bind(&service.description)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_insert(
                e,
                format!("A service with slug '{}' already exists.", service.slug),
            )
        })?;

        Ok(())
    }

    async fn update(&self, service: &CareService) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE care_services
            SET slug = ?, name = ?, base_rate = ?, rate_unit = ?, currency = ?, status = ?,
                label = ?, icon = ?, tagline = ?, short_description = ?, description = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.slug)
        .bind(&service.name)
        .bind(service.pricing.base_rate)
        .bind(service.pricing.unit.as_str())
        .bind(service.pricing.currency.as_str())
        .bind(service.status.as_str())
        .bind(&service.label)
        .bind(&service.icon)
        .bind(&service.tagline)
        .bind(&service.short_description)
        .bind(&service.description)
        .bind(service.updated_at)
        .bind(&service.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_insert(
                e,
                format!("A service with slug '{}' already exists.", service.slug),
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Service not found."));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<CareService>> {
        let row = sqlx::query_as::<_, CareServiceRow>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(CareServiceRow::into_service).transpose()
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<CareService>> {
        let row =
            sqlx::query_as::<_, CareServiceRow>(&format!("{} WHERE slug = ?", SELECT_COLUMNS))
                .bind(slug)
                .fetch_optional(&self.pool)
                .await?;

        row.map(CareServiceRow::into_service).transpose()
    }

    async fn list(&self, active_only: bool) -> Result<Vec<CareService>> {
        let sql = if active_only {
            format!("{} WHERE status = 'active' ORDER BY name", SELECT_COLUMNS)
        } else {
            format!("{} ORDER BY name", SELECT_COLUMNS)
        };

        let rows = sqlx::query_as::<_, CareServiceRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(CareServiceRow::into_service).collect()
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM care_services")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CareServiceRow {
    id: String,
    slug: String,
    name: String,
    base_rate: Decimal,
    rate_unit: String,
    currency: String,
    status: String,
    label: String,
    icon: String,
    tagline: String,
    short_description: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CareServiceRow {
    fn into_service(self) -> Result<CareService> {
        let invalid = |e: String| AppError::Internal(format!("Invalid service row: {}", e));

        Ok(CareService {
            pricing: Pricing {
                base_rate: self.base_rate.normalize(),
                unit: self.rate_unit.parse().map_err(invalid)?,
                currency: self.currency.parse().map_err(invalid)?,
            },
            status: self.status.parse().map_err(invalid)?,
            id: self.id,
            slug: self.slug,
            name: self.name,
            label: self.label,
            icon: self.icon,
            tagline: self.tagline,
            short_description: self.short_description,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
