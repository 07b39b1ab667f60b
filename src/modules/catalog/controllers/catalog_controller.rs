use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::catalog::services::CatalogService;

/// List active services
/// GET /services
pub async fn list_services(
    service: web::Data<Arc<CatalogService>>,
) -> Result<HttpResponse, AppError> {
    let services = service.list_active().await?;
    Ok(HttpResponse::Ok().json(services))
}

/// GET /services/{slug}
pub async fn get_service(
    service: web::Data<Arc<CatalogService>>,
    slug: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let found = service.get_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(found))
}

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .route("", web::get().to(list_services))
            .route("/{slug}", web::get().to(get_service)),
    );
}
