use std::sync::{Arc, OnceLock};

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::middleware::auth::{hash_password, verify_password};
use crate::modules::accounts::models::{LoginRequest, RegisterRequest, User, UserRole};
use crate::modules::accounts::repositories::UserRepository;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Service for account registration, sign-in and role management
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    admin_emails: Vec<String>,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, admin_emails: Vec<String>) -> Self {
        Self {
            users,
            admin_emails: admin_emails
                .into_iter()
                .map(|email| normalize_email(&email))
                .collect(),
        }
    }

    /// Create an account. Emails in the admin bootstrap list get the admin role.
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        let name = required(request.name.as_deref(), "name")?;
        let email = normalize_email(required(request.email.as_deref(), "email")?);
        let password = request.password.unwrap_or_default();

        if !email.contains('@') {
            return Err(AppError::validation("Invalid email address."));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters.",
                MIN_PASSWORD_LEN
            )));
        }

        let role = if self.admin_emails.contains(&email) {
            UserRole::Admin
        } else {
            UserRole::User
        };

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email,
            password_hash: hash_password(&password)?,
            role,
            created_at: now,
            updated_at: now,
        };

        self.users.insert(&user).await?;
        info!(user_id = %user.id, role = %user.role, "Account registered");

        Ok(user)
    }

    /// Check credentials. Unknown email and wrong password give the same error.
    pub async fn authenticate(&self, request: LoginRequest) -> Result<User> {
        let email = normalize_email(request.email.as_deref().unwrap_or_default());
        let password = request.password.unwrap_or_default();

        let invalid = || AppError::unauthorized("Invalid email or password.");

        let Some(user) = self.users.find_by_email(&email).await? else {
            // Same Argon2 cost as a real account
            if let Some(hash) = unknown_account_hash() {
                let _ = verify_password(&password, hash);
            }
            return Err(invalid());
        };
        if !verify_password(&password, &user.password_hash)? {
            warn!(user_id = %user.id, "Failed sign-in attempt");
            return Err(invalid());
        }

        Ok(user)
    }

    pub async fn find_user(&self, id: &str) -> Result<Option<User>> {
        self.users.find_by_id(id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list_all().await
    }

    /// Change a user's role. `raw_role` must be "user" or "admin".
    pub async fn update_role(&self, id: &str, raw_role: Option<&str>) -> Result<User> {
        let role = raw_role
            .and_then(|r| r.parse::<UserRole>().ok())
            .ok_or_else(|| AppError::validation("Invalid role."))?;

        if !self.users.update_role(id, role, Utc::now()).await? {
            return Err(AppError::not_found("User not found."));
        }
        info!(user_id = %id, role = %role, "User role updated");

        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found."))
    }
}

/// Hash checked when no account matches, so both failures cost the same
fn unknown_account_hash() -> Option<&'static str> {
    static HASH: OnceLock<Option<String>> = OnceLock::new();
    HASH.get_or_init(|| hash_password("nestcare-unknown-account").ok())
        .as_deref()
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(format!("Missing required field: {}.", field)))
}
