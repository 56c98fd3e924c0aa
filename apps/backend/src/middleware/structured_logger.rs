//! One `request_completed` record per request.
//!
//! Level follows the status class: 5xx at error, 4xx at warn, the rest at
//! info. Authenticated requests also carry the subject id.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use super::trace_span::route_label;
use crate::auth::claims::BackendClaims;
use crate::trace_ctx::RequestId;

/// Fields of one completed request.
struct Completion {
    method: String,
    route: String,
    trace_id: String,
    status: StatusCode,
    subject: Option<String>,
    duration_us: u64,
}

impl Completion {
    fn emit(&self) {
        let status = self.status.as_u16();
        let subject = self.subject.as_deref().unwrap_or("-");
        let (method, route, trace_id, duration_us) =
            (&self.method, &self.route, &self.trace_id, self.duration_us);

        if self.status.is_server_error() {
            error!(http.method = %method, http.route = %route, http.status_code = status, duration_us, trace_id = %trace_id, subject, "request_completed");
        } else if self.status.is_client_error() {
            warn!(http.method = %method, http.route = %route, http.status_code = status, duration_us, trace_id = %trace_id, subject, "request_completed");
        } else {
            info!(http.method = %method, http.route = %route, http.status_code = status, duration_us, trace_id = %trace_id, subject, "request_completed");
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let route = route_label(&req);
        let trace_id = RequestId::from_extensions(&req.extensions());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            // claims are only present once JwtExtract accepted a token
            let (status, subject) = match &result {
                Ok(res) => (
                    res.status(),
                    res.request()
                        .extensions()
                        .get::<BackendClaims>()
                        .map(|c| c.sub.clone()),
                ),
                Err(err) => (err.as_response_error().status_code(), None),
            };

            Completion {
                method,
                route,
                trace_id,
                status,
                subject,
                duration_us: start.elapsed().as_micros() as u64,
            }
            .emit();

            result
        })
    }
}
