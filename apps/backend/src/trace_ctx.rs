//! Request correlation ids.
//!
//! `RequestTrace` generates one id per request, stores it in the request
//! extensions as [`RequestId`] and runs the rest of the chain inside a
//! task-local scope. Middleware reads the extension; handlers, services and
//! error rendering read the task-local through [`trace_id()`].

use actix_web::dev::Extensions;
use tokio::task_local;

const UNKNOWN: &str = "unknown";

task_local! {
    static TRACE_ID: String;
}

/// Correlation id stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Id from `extensions`, or `"unknown"` when `RequestTrace` did not run.
    pub fn from_extensions(extensions: &Extensions) -> String {
        extensions
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Trace id for the current task, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
