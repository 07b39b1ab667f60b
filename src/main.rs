use std::sync::Arc;

use actix_cors::Cors;
use actix_identity::IdentityMiddleware;
use actix_session::storage::{CookieSessionStore, RedisSessionStore, SessionStore};
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::{http::header, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use nestcare::config::{AppConfig, Config, DatabaseConfig};
use nestcare::middleware::{RateLimiter, RequestId};
use nestcare::modules::notifications::{BookingNotifier, DisabledNotifier, SmtpNotifier};
use nestcare::modules::recommendations::{CompletionClient, OpenAiCompletionClient};
use nestcare::{AppState, Repositories};

const SESSION_COOKIE: &str = "nestcare_session";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(&config.app);
    config.validate()?;

    tracing::info!(
        env = %config.app.env,
        bind = %config.server.bind_address(),
        "Starting NestCare API"
    );

    let pool = config.database.create_pool().await?;
    DatabaseConfig::run_migrations(&pool).await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "Database pool initialized and migrations applied"
    );

    let notifier: Arc<dyn BookingNotifier> = if config.mail.is_enabled() {
        Arc::new(SmtpNotifier::new(&config.mail)?)
    } else {
        tracing::warn!("EMAIL_USER or EMAIL_PASS is not set. Invoice e-mails are disabled.");
        Arc::new(DisabledNotifier)
    };

    let completion = OpenAiCompletionClient::from_config(&config.completion)?
        .map(|client| Arc::new(client) as Arc<dyn CompletionClient>);
    if completion.is_none() {
        tracing::info!("OPENAI_API_KEY is not set. Recommendations use the fallback scorer.");
    }

    let state = AppState::new(
        Repositories::mysql(pool.clone()),
        notifier,
        completion,
        config.security.admin_emails.clone(),
    );

    match config.security.redis_url.clone() {
        Some(redis_url) => {
            let store = RedisSessionStore::new(redis_url).await?;
            tracing::info!("Sessions stored in Redis");
            serve(&config, state, pool, move || store.clone()).await?;
        }
        None => {
            tracing::info!("REDIS_URL is not set. Sessions stored in signed cookies.");
            serve(&config, state, pool, CookieSessionStore::default).await?;
        }
    }

    Ok(())
}

async fn serve<S, F>(
    config: &Config,
    state: AppState,
    pool: sqlx::MySqlPool,
    session_store: F,
) -> std::io::Result<()>
where
    S: SessionStore + 'static,
    F: Fn() -> S + Clone + Send + 'static,
{
    let session_key = Key::from(config.security.session_key.as_bytes());
    let secure_cookies = config.app.is_production();
    let rate_limiter = RateLimiter::new(config.security.rate_limit_per_minute);
    let cors_origin = config.security.cors_allowed_origin.clone();
    let bind_address = config.server.bind_address();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .supports_credentials()
            .max_age(3600);

        let session = SessionMiddleware::builder(session_store(), session_key.clone())
            .cookie_name(SESSION_COOKIE.to_string())
            .cookie_secure(secure_cookies)
            .build();

        let state = state.clone();
        App::new()
            .app_data(actix_web::web::Data::new(pool.clone()))
            .configure(|cfg| state.configure(cfg))
            .wrap(IdentityMiddleware::default())
            .wrap(session)
            .wrap(rate_limiter.clone())
            .wrap(cors)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

fn init_tracing(app: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nestcare={},actix_web=info", app.log_level)));
    let registry = tracing_subscriber::registry().with(filter);

    if app.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
