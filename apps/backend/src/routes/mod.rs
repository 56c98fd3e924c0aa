use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod health;
pub mod mail;
pub mod recordings;
pub mod users;

/// Register every route. Used by `main` and by the integration tests, so
/// the protected scopes carry `JwtExtract` here rather than in `main`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // /health
    cfg.configure(health::configure_routes);

    // /api/users/** (register and login are public; the rest is per-resource protected)
    cfg.service(web::scope("/api/users").configure(users::configure_routes));

    // /api/recordings
    cfg.service(
        web::scope("/api/recordings")
            .wrap(JwtExtract)
            .configure(recordings::configure_routes),
    );

    // /api/mail/**
    cfg.service(
        web::scope("/api/mail")
            .wrap(JwtExtract)
            .configure(mail::configure_routes),
    );
}
