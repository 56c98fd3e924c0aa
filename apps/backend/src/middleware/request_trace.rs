//! Per-request trace id.
//!
//! Generates a UUID per request, stores it in request extensions for the
//! span and logger middleware, runs the rest of the chain inside the
//! task-local trace scope, and echoes it as `x-request-id` (and
//! `x-trace-id`) on every response.

use std::rc::Rc;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    HttpMessage,
};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use uuid::Uuid;

use crate::trace_ctx;

pub struct RequestTrace;

impl<S, B> Transform<S, ServiceRequest> for RequestTrace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequestTraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTraceMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestTraceMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestTraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = Uuid::new_v4().to_string();
        req.extensions_mut().insert(trace_ctx::RequestId(trace_id.clone()));

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let mut res =
                trace_ctx::with_trace_id(trace_id.clone(), async move { service.call(req).await })
                    .await?;

            let value = header::HeaderValue::from_str(&trace_id)
                .unwrap_or_else(|_| header::HeaderValue::from_static("invalid-uuid"));
            res.headers_mut().insert(
                header::HeaderName::from_static("x-request-id"),
                value.clone(),
            );
            if !res.headers().contains_key("x-trace-id") {
                res.headers_mut()
                    .insert(header::HeaderName::from_static("x-trace-id"), value);
            }

            Ok(res)
        })
    }
}
