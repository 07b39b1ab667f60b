// Correlation id for every request.
//
// Honors a caller-supplied `x-request-id` when it looks sane, otherwise
// generates one. The id is stored in request extensions for error logging
// and echoed on the response.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
    Error, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_INBOUND_ID_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct RequestIdValue(pub String);

/// Request id of `req`, if the middleware ran
pub fn request_id(req: &HttpRequest) -> Option<String> {
    req.extensions().get::<RequestIdValue>().map(|id| id.0.clone())
}

fn inbound_id(req: &ServiceRequest) -> Option<String> {
    let raw = req.headers().get(REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let usable = !raw.is_empty()
        && raw.len() <= MAX_INBOUND_ID_LEN
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    usable.then(|| raw.to_string())
}

pub struct RequestId;

impl<S, B> Transform<S, ServiceRequest> for RequestId
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdMiddleware { service }))
    }
}

pub struct RequestIdMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let id = inbound_id(&req).unwrap_or_else(|| Uuid::new_v4().to_string());
        let started = Instant::now();
        req.extensions_mut().insert(RequestIdValue(id.clone()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            tracing::debug!(
                request_id = %id,
                status = res.status().as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Request finished"
            );

            if let Ok(value) = HeaderValue::from_str(&id) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(res)
        })
    }
}
