use crate::core::{AppError, Result};
use std::env;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub mail: MailConfig,
    pub completion: CompletionConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}

/// SMTP settings. Mail is disabled unless both user and password are set.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub from: Option<String>,
}

impl MailConfig {
    pub fn is_enabled(&self) -> bool {
        self.user.is_some() && self.password.is_some()
    }

    /// Sender address, falling back to the SMTP user
    pub fn sender(&self) -> Option<&str> {
        self.from.as_deref().or(self.user.as_deref())
    }
}

/// Chat-completion provider used by the recommendation wizard
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub session_key: String,
    pub redis_url: Option<String>,
    pub cors_allowed_origin: String,
    pub rate_limit_per_minute: u32,
    /// Accounts registered with one of these emails get the admin role
    pub admin_emails: Vec<String>,
}

/// Minimum key length accepted by `actix_web::cookie::Key::from`
pub const MIN_SESSION_KEY_LEN: usize = 64;

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            mail: MailConfig {
                host: env::var("EMAIL_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                port: parse_var("EMAIL_PORT", 465)?,
                user: optional_var("EMAIL_USER"),
                password: optional_var("EMAIL_PASS"),
                from: optional_var("EMAIL_FROM"),
            },
            completion: CompletionConfig {
                api_key: optional_var("OPENAI_API_KEY"),
                base_url: env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            },
            security: SecurityConfig {
                session_key: env::var("SESSION_KEY")
                    .map_err(|_| AppError::Configuration("SESSION_KEY not set".to_string()))?,
                redis_url: optional_var("REDIS_URL"),
                cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                    .unwrap_or_else(|_| "http://localhost:3000".to_string()),
                rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", 600)?,
                admin_emails: optional_var("ADMIN_EMAILS")
                    .map(|raw| parse_list(&raw))
                    .unwrap_or_default(),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::Configuration(
                "DATABASE_URL must not be empty".to_string(),
            ));
        }

        if self.security.rate_limit_per_minute == 0 {
            return Err(AppError::Configuration(
                "Rate limit must be greater than 0".to_string(),
            ));
        }

        if self.security.session_key.len() < MIN_SESSION_KEY_LEN {
            return Err(AppError::Configuration(format!(
                "SESSION_KEY must be at least {} bytes",
                MIN_SESSION_KEY_LEN
            )));
        }

        Ok(())
    }
}

pub(crate) fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Parse `name` when set and non-blank, else return `default`
pub(crate) fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match optional_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}: {}", name, raw))),
        None => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
