//! Wraps each request in a `request` span so handler logs carry the
//! request id, method and route.
//!
//! The route is the matched pattern (`/api/users/{email}`), never the raw
//! path, because user routes embed email addresses. `RequestTrace` must
//! wrap outside this middleware so the request id is already present.

use std::future::{ready, Ready};

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{info_span, Instrument};

use crate::trace_ctx::RequestId;

/// Matched route pattern, or `unmatched` for requests no route accepts.
pub(crate) fn route_label(req: &ServiceRequest) -> String {
    req.match_pattern().unwrap_or_else(|| "unmatched".to_string())
}

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware { service }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = info_span!(
            "request",
            trace_id = %RequestId::from_extensions(&req.extensions()),
            method = %req.method(),
            route = %route_label(&req),
        );

        Box::pin(self.service.call(req).instrument(span))
    }
}
