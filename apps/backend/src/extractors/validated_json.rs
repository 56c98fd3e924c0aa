use std::future::Future;
use std::ops::Deref;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::logging::pii::Redacted;

/// Request bodies for the account and mail routes are small; uploads do not
/// go through this extractor.
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

/// JSON body extractor whose failures render as `400 BAD_REQUEST` Problem
/// Details instead of actix's plain-text JSON errors.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn bad_body(detail: impl Into<String>) -> AppError {
    AppError::bad_request(ErrorCode::BadRequest, detail)
}

/// Drain `payload`, refusing to buffer more than `limit` bytes.
async fn read_limited(mut payload: Payload, limit: usize) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "failed to read request body");
            bad_body("Failed to read request body")
        })?;
        if body.len() + chunk.len() > limit {
            return Err(bad_body("Request body too large"));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Client-facing description of a parse failure. Never echoes body content,
/// which may hold passwords.
fn describe_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: missing or mistyped fields".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Box::pin(async move {
            let body = read_limited(payload, MAX_JSON_BODY_BYTES).await?;

            serde_json::from_slice::<T>(&body)
                .map(ValidatedJson)
                .map_err(|e| {
                    debug!(
                        error = %Redacted(&e.to_string()),
                        content_type = %content_type,
                        body_size = body.len(),
                        "json body rejected"
                    );
                    bad_body(describe_json_error(&e))
                })
        })
    }
}
