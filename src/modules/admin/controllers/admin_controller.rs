use std::sync::Arc;

use actix_web::{web, HttpResponse};
use tracing::info;

use crate::core::AppError;
use crate::middleware::auth::AdminUser;
use crate::modules::accounts::models::{UpdateRoleRequest, UserResponse};
use crate::modules::accounts::services::AccountService;
use crate::modules::admin::services::AdminService;
use crate::modules::bookings::models::UpdateStatusRequest;
use crate::modules::bookings::services::BookingService;
use crate::modules::catalog::models::{CreateServiceRequest, UpdateServiceRequest};
use crate::modules::catalog::services::CatalogService;

/// GET /admin/stats
pub async fn stats(
    service: web::Data<Arc<AdminService>>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let stats = service.stats().await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /admin/bookings
pub async fn list_bookings(
    service: web::Data<Arc<BookingService>>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let bookings = service.list_all().await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// PATCH /admin/bookings/{id}/status
pub async fn update_booking_status(
    service: web::Data<Arc<BookingService>>,
    admin: AdminUser,
    path: web::Path<String>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let booking = service
        .set_status(&path, request.status.as_deref())
        .await?;

    info!(admin_id = %admin.0.id, booking_id = %booking.id, "Admin changed booking status");
    Ok(HttpResponse::Ok().json(booking))
}

/// Every service, including inactive ones
/// GET /admin/services
pub async fn list_services(
    service: web::Data<Arc<CatalogService>>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let services = service.list_all().await?;
    Ok(HttpResponse::Ok().json(services))
}

/// POST /admin/services
pub async fn create_service(
    service: web::Data<Arc<CatalogService>>,
    _admin: AdminUser,
    request: web::Json<CreateServiceRequest>,
) -> Result<HttpResponse, AppError> {
    let created = service.create(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// PUT /admin/services/{id}
pub async fn update_service(
    service: web::Data<Arc<CatalogService>>,
    _admin: AdminUser,
    path: web::Path<String>,
    request: web::Json<UpdateServiceRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = service.update(&path, request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// GET /admin/users
pub async fn list_users(
    service: web::Data<Arc<AccountService>>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let users = service.list_users().await?;
    let users: Vec<UserResponse> = users.iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// PATCH /admin/users/{id}/role
pub async fn update_user_role(
    service: web::Data<Arc<AccountService>>,
    admin: AdminUser,
    path: web::Path<String>,
    request: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, AppError> {
    let user = service
        .update_role(&path, request.role.as_deref())
        .await?;

    info!(admin_id = %admin.0.id, user_id = %user.id, role = user.role.as_str(), "Admin changed user role");
    Ok(HttpResponse::Ok().json(UserResponse::from(&user)))
}

/// Configure admin routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/stats", web::get().to(stats))
            .route("/bookings", web::get().to(list_bookings))
            .route("/bookings/{id}/status", web::patch().to(update_booking_status))
            .route("/services", web::get().to(list_services))
            .route("/services", web::post().to(create_service))
            .route("/services/{id}", web::put().to(update_service))
            .route("/users", web::get().to(list_users))
            .route("/users/{id}/role", web::patch().to(update_user_role)),
    );
}
