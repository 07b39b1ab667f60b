use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::middleware::auth::CurrentUser;
use crate::modules::bookings::models::{CreateBookingRequest, UpdateStatusRequest};
use crate::modules::bookings::services::BookingService;
use crate::modules::timeline;

/// Create a booking. Signing in is optional.
/// POST /bookings
pub async fn create_booking(
    service: web::Data<Arc<BookingService>>,
    user: Option<CurrentUser>,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    let booking = service
        .create_booking(request.into_inner(), user.as_ref().map(|u| &u.0))
        .await?;

    Ok(HttpResponse::Created().json(booking))
}

/// Bookings of the signed-in user
/// GET /bookings
pub async fn list_my_bookings(
    service: web::Data<Arc<BookingService>>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let bookings = service.list_for_user(&user.0).await?;
    Ok(HttpResponse::Ok().json(bookings))
}

/// GET /bookings/{id}
pub async fn get_booking(
    service: web::Data<Arc<BookingService>>,
    user: Option<CurrentUser>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let booking = service
        .get_booking(&path, user.as_ref().map(|u| &u.0))
        .await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// PATCH /bookings/{id}
pub async fn update_status(
    service: web::Data<Arc<BookingService>>,
    user: Option<CurrentUser>,
    path: web::Path<String>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let booking = service
        .update_status(
            &path,
            request.status.as_deref(),
            user.as_ref().map(|u| &u.0),
        )
        .await?;

    Ok(HttpResponse::Ok().json(booking))
}

/// Configure booking routes, including the nested timeline
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(create_booking))
            .route("", web::get().to(list_my_bookings))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}", web::patch().to(update_status))
            .configure(timeline::controllers::configure),
    );
}
