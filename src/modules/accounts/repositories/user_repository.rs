use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::accounts::models::{User, UserRole};

/// Storage for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Fails with `Conflict` when the email is taken.
    async fn insert(&self, user: &User) -> Result<()>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Lookup by lower-cased email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// All users, newest first
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Returns false when no user has this id
    async fn update_role(&self, id: &str, role: UserRole, updated_at: DateTime<Utc>)
        -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn insert(&self, user: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_insert(e, "An account with this email already exists."))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, role, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update_role(
        &self,
        id: &str,
        role: UserRole,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User> {
        let role = self
            .role
            .parse::<UserRole>()
            .map_err(|e| AppError::Internal(format!("Invalid role in database: {}", e)))?;

        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
