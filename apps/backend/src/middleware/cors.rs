use std::env;

use actix_cors::Cors;
use actix_web::http::header;

/// Origins from `CORS_ALLOWED_ORIGINS` (comma separated). Entries that are
/// blank, `null` or not http(s) are dropped.
pub fn allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}

/// CORS for the browser client. Falls back to localhost origins when
/// nothing valid is configured.
pub fn cors_middleware() -> Cors {
    let configured = allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let origins = if configured.is_empty() {
        vec![
            "http://localhost:3000".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ]
    } else {
        configured
    };

    let mut cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-trace-id"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}
