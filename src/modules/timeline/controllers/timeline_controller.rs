use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::timeline::models::AddEventRequest;
use crate::modules::timeline::services::TimelineService;

/// GET /bookings/{id}/timeline
pub async fn list_events(
    service: web::Data<Arc<TimelineService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let events = service.list_events(&path).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// POST /bookings/{id}/timeline
pub async fn add_event(
    service: web::Data<Arc<TimelineService>>,
    path: web::Path<String>,
    request: web::Json<AddEventRequest>,
) -> Result<HttpResponse, AppError> {
    let event = service.add_event(&path, request.into_inner()).await?;
    Ok(HttpResponse::Created().json(event))
}

/// Fill an empty timeline with demo events
/// POST /bookings/{id}/timeline/seed
pub async fn seed_events(
    service: web::Data<Arc<TimelineService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let events = service.seed_if_empty(&path).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// Timeline routes, relative to the `/bookings` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/{id}/timeline", web::get().to(list_events))
        .route("/{id}/timeline", web::post().to(add_event))
        .route("/{id}/timeline/seed", web::post().to(seed_events));
}
