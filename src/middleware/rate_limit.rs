use std::future::{ready, Ready};
use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use governor::{clock::DefaultClock, state::keyed::DefaultKeyedStateStore, Quota};

use crate::core::AppError;

type ClientLimiter = governor::RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Idle clients are dropped from the limiter after this many checks
const PRUNE_EVERY: u64 = 1024;

/// Per-client request quota, keyed by the socket peer address. Forwarding
/// headers are ignored. Health probes are exempt.
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<ClientLimiter>,
    checks: Arc<AtomicU64>,
    per_minute: u32,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);

        Self {
            limiter: Arc::new(governor::RateLimiter::keyed(Quota::per_minute(per_minute))),
            checks: Arc::new(AtomicU64::new(0)),
            per_minute: per_minute.get(),
        }
    }

    fn allow(&self, client: &String) -> bool {
        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % PRUNE_EVERY == 0 {
            self.prune();
        }
        self.limiter.check_key(client).is_ok()
    }

    /// Forget clients whose quota has fully refilled
    fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        tracing::debug!(clients = self.limiter.len(), "Rate limiter pruned");
    }
}

fn is_exempt(path: &str) -> bool {
    matches!(path, "/health" | "/ready")
}

fn client_key(req: &ServiceRequest) -> String {
    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            config: self.clone(),
        }))
    }
}

pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    config: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let config = self.config.clone();

        Box::pin(async move {
            if is_exempt(req.path()) {
                return svc.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let client = client_key(&req);
            if config.allow(&client) {
                return svc.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            tracing::warn!(client = %client, path = %req.path(), "Rate limit exceeded");
            let response = AppError::RateLimitExceeded(format!(
                "Maximum {} requests per minute.",
                config.per_minute
            ))
            .error_response();
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}
