use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::BackendClaims;
use crate::error::AppError;

/// Identity bound to the request by `JwtExtract`.
///
/// Reads `BackendClaims` from request extensions; a handler outside the
/// authenticated scope gets `NO_TOKEN`.
#[derive(Debug, Clone)]
pub struct CurrentSubject(pub BackendClaims);

impl CurrentSubject {
    pub fn claims(&self) -> &BackendClaims {
        &self.0
    }

    pub fn sub(&self) -> &str {
        &self.0.sub
    }
}

impl FromRequest for CurrentSubject {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<BackendClaims>().cloned();
        ready(claims.map(CurrentSubject).ok_or_else(AppError::no_token))
    }
}
