use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extractors::{CurrentSubject, ValidatedJson};
use crate::services::mail as mail_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub object_key: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: &'static str,
}

async fn send_summary(
    body: ValidatedJson<SummaryRequest>,
    subject: CurrentSubject,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;

    mail_service::send_summary(
        db,
        app_state.mailer.as_ref(),
        subject.claims(),
        &body.object_key,
        &body.message,
    )
    .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Email sent successfully!",
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/summary").route(web::post().to(send_summary)));
}
