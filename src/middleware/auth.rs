use std::sync::Arc;

use actix_identity::IdentityExt;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use futures_util::future::LocalBoxFuture;

use crate::core::{AppError, Result};
use crate::modules::accounts::{AccountService, User};

/// Signed-in user, resolved from the session identity on every request.
///
/// Use `Option<CurrentUser>` on routes that also accept anonymous callers.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Signed-in user with the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            resolve_user(&req)
                .await
                .map(CurrentUser)
                .map_err(actix_web::Error::from)
        })
    }
}

impl FromRequest for AdminUser {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { resolve_admin(&req).await.map_err(actix_web::Error::from) })
    }
}

async fn resolve_admin(req: &HttpRequest) -> Result<AdminUser> {
    let user = resolve_user(req).await?;
    if !user.is_admin() {
        tracing::warn!(user_id = %user.id, path = %req.path(), "Admin access denied");
        return Err(AppError::forbidden("Admin access required."));
    }
    Ok(AdminUser(user))
}

async fn resolve_user(req: &HttpRequest) -> Result<User> {
    let accounts = req
        .app_data::<web::Data<Arc<AccountService>>>()
        .cloned()
        .ok_or_else(|| AppError::internal("Account service is not registered"))?;

    let user_id = req
        .get_identity()
        .ok()
        .and_then(|identity| identity.id().ok())
        .ok_or_else(|| AppError::unauthorized("Sign in required."))?;

    // A session can outlive its account
    accounts
        .find_user(&user_id)
        .await?
        .ok_or_else(|| AppError::unauthorized("Sign in required."))
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against an Argon2 hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
