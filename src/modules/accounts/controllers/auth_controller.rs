use std::sync::Arc;

use actix_identity::Identity;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use crate::core::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::accounts::models::{LoginRequest, RegisterRequest, User, UserResponse};
use crate::modules::accounts::services::AccountService;

/// Register and sign in
/// POST /auth/register
pub async fn register(
    service: web::Data<Arc<AccountService>>,
    req: HttpRequest,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = service.register(request.into_inner()).await?;
    start_session(&req, &user)?;

    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// POST /auth/login
pub async fn login(
    service: web::Data<Arc<AccountService>>,
    req: HttpRequest,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = service.authenticate(request.into_inner()).await?;
    start_session(&req, &user)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// POST /auth/logout
pub async fn logout(identity: Option<Identity>) -> HttpResponse {
    if let Some(identity) = identity {
        identity.logout();
    }
    HttpResponse::NoContent().finish()
}

/// GET /auth/me
pub async fn me(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(UserResponse::from(&user.0))
}

fn start_session(req: &HttpRequest, user: &User) -> Result<(), AppError> {
    Identity::login(&req.extensions(), user.id.clone())
        .map_err(|e| AppError::internal(format!("Failed to start session: {}", e)))?;
    Ok(())
}

/// Configure auth routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}
