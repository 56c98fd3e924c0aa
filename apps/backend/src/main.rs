use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use minutes::config::app::Config;
use minutes::config::db::DbProfile;
use minutes::infra::state::build_state;
use minutes::mail::mailer_from_config;
use minutes::middleware::cors::cors_middleware;
use minutes::middleware::request_trace::RequestTrace;
use minutes::middleware::structured_logger::StructuredLogger;
use minutes::middleware::trace_span::TraceSpan;
use minutes::routes;
use minutes::state::security_config::SecurityConfig;
use minutes::storage::{BlobStore, FsBlobStore};
use minutes::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker-compose env_file, or `set -a; . ./.env; set +a` locally).
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let mailer = match mailer_from_config(&config.mail) {
        Ok(mailer) => mailer,
        Err(e) => {
            error!(error = %e, "failed to build mailer");
            std::process::exit(1);
        }
    };
    let blob_store: Arc<dyn BlobStore> = Arc::new(FsBlobStore::new(config.storage.clone()));

    let app_state = match build_state()
        .with_db(DbProfile::Postgres)
        .with_security(SecurityConfig::new(config.jwt_secret.as_bytes()))
        .with_blob_store(blob_store)
        .with_mailer(mailer)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting minutes backend");

    let data = web::Data::new(app_state);
    let max_upload_bytes = config.max_upload_bytes;

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
