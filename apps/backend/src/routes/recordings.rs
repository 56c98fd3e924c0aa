//! `/api/recordings`: upload and list the caller's recordings.
//!
//! Uploads send the file as the raw request body, with the meeting title and
//! original file name in the query string.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::AppError;
use crate::extractors::CurrentSubject;
use crate::repos::recordings::Recording;
use crate::services::recordings::{self as recordings_service, Upload};
use crate::state::app_state::AppState;
use crate::utils::dates::format_timestamp;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordingView {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub meeting_title: String,
    pub original_file_name: String,
    pub object_key: String,
    pub content_type: Option<String>,
    pub size_bytes: i64,
    pub created_at: String,
}

impl From<&Recording> for RecordingView {
    fn from(recording: &Recording) -> Self {
        Self {
            id: recording.id.to_string(),
            user_id: recording.user_id.to_string(),
            email: recording.email.clone(),
            meeting_title: recording.meeting_title.clone(),
            original_file_name: recording.original_file_name.clone(),
            object_key: recording.object_key.clone(),
            content_type: recording.content_type.clone(),
            size_bytes: recording.size_bytes,
            created_at: format_timestamp(recording.created_at),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadQuery {
    pub meeting_title: Option<String>,
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    recording: RecordingView,
    location: String,
}

#[derive(Debug, Serialize)]
struct ListResponse {
    recordings: Vec<RecordingView>,
}

async fn upload(
    req: HttpRequest,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
    subject: CurrentSubject,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let query = query.into_inner();

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let upload = Upload {
        meeting_title: query.meeting_title.unwrap_or_default(),
        file_name: query.file_name.unwrap_or_default(),
        content_type,
        data: body,
    };

    let (recording, location) = recordings_service::upload(
        db,
        app_state.blob_store.as_ref(),
        subject.claims(),
        upload,
        OffsetDateTime::now_utc(),
    )
    .await?;

    Ok(HttpResponse::Created().json(UploadResponse {
        recording: RecordingView::from(&recording),
        location,
    }))
}

async fn list(
    subject: CurrentSubject,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = app_state.require_db()?;
    let recordings = recordings_service::list(db, subject.claims()).await?;

    Ok(HttpResponse::Ok().json(ListResponse {
        recordings: recordings.iter().map(RecordingView::from).collect(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::post().to(upload))
            .route(web::get().to(list)),
    );
}
