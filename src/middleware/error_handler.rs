use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    HttpRequest,
};

use crate::core::AppError;
use crate::middleware::request_id::request_id;

/// Turn body parse failures into the standard JSON error shape (400)
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::validation(format!("Invalid request body: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::validation(format!("Invalid query string: {}", err)).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log_error(req, &err);
    AppError::validation(format!("Invalid path parameter: {}", err)).into()
}

pub fn log_error(req: &HttpRequest, err: &dyn std::fmt::Display) {
    tracing::debug!(
        request_id = %request_id(req).unwrap_or_default(),
        method = %req.method(),
        path = %req.path(),
        error = %err,
        "Rejected request payload"
    );
}
