//! Bearer-token authentication middleware.
//!
//! Wraps the protected scopes. A request either leaves here with
//! `BackendClaims` in its extensions or is answered with a 403 Problem
//! Details response (`NO_TOKEN` or `INVALID_TOKEN`); the inner service is
//! never called for a rejected request.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::BackendClaims;
use crate::auth::jwt::{verify_access_token, VerificationError};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: Rc<S>,
}

/// Outcome of checking the `Authorization` header.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    Authenticated(BackendClaims),
    Missing,
    Rejected(VerificationError),
}

/// Token from `Authorization: Bearer <token>`. Absent, non-UTF-8, non-Bearer
/// and empty values all count as no token.
pub fn bearer_token(header_value: Option<&HeaderValue>) -> Option<&str> {
    let auth_str = header_value?.to_str().ok()?;
    let mut parts = auth_str.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if !scheme.eq_ignore_ascii_case("Bearer") || parts.next().is_some() || token.is_empty() {
        return None;
    }
    Some(token)
}

/// Decide whether a call is authenticated. The token is only verified when
/// one was actually presented.
pub fn authenticate(header_value: Option<&HeaderValue>, security: &SecurityConfig) -> AuthOutcome {
    match bearer_token(header_value) {
        None => AuthOutcome::Missing,
        Some(token) => match verify_access_token(token, security) {
            Ok(claims) => AuthOutcome::Authenticated(claims),
            Err(kind) => AuthOutcome::Rejected(kind),
        },
    }
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
                let err = AppError::internal("AppState not available to auth middleware");
                return Ok(req.error_response(err).map_into_right_body());
            };

            let peer = req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string();

            let outcome = authenticate(
                req.headers().get(header::AUTHORIZATION),
                &app_state.security,
            );

            match outcome {
                AuthOutcome::Authenticated(claims) => {
                    security::token_accepted(&claims.email);
                    req.extensions_mut().insert(claims);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                AuthOutcome::Missing => {
                    security::token_missing(&peer);
                    Ok(req.error_response(AppError::no_token()).map_into_right_body())
                }
                AuthOutcome::Rejected(kind) => {
                    security::token_rejected(&peer, &kind.to_string());
                    Ok(req
                        .error_response(AppError::invalid_token())
                        .map_into_right_body())
                }
            }
        })
    }
}
