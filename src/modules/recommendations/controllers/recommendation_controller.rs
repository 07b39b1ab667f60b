use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::recommendations::models::Selections;
use crate::modules::recommendations::services::RecommendationService;

/// POST /recommendations
pub async fn recommend(
    service: web::Data<Arc<RecommendationService>>,
    selections: web::Json<Selections>,
) -> Result<HttpResponse, AppError> {
    let recommendation = service.recommend(selections.into_inner()).await?;
    Ok(HttpResponse::Ok().json(recommendation))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::post().to(recommend));
}
