// /api/recordings: upload and list.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use serde_json::Value;

use crate::support::create_test_app;
use crate::support::factory::{register_user, upload_recording};
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn upload_stores_blob_and_metadata() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let blob_root = ctx.blob_dir.path().to_path_buf();
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "upload").await;

    let body = upload_recording(&app, &user, "Weekly-Sync", "sync.webm", b"RIFFdata").await;
    let recording = &body["recording"];

    assert_eq!(recording["userId"], user.id.as_str());
    assert_eq!(recording["email"], user.email.as_str());
    assert_eq!(recording["meetingTitle"], "Weekly-Sync");
    assert_eq!(recording["originalFileName"], "sync.webm");
    assert_eq!(recording["contentType"], "audio/webm");
    assert_eq!(recording["sizeBytes"], 8);

    let object_key = recording["objectKey"].as_str().unwrap();
    assert!(object_key.starts_with(&format!("{}_", user.email)));
    assert!(object_key.ends_with("_sync.webm"));

    let stored = std::fs::read(blob_root.join(object_key))?;
    assert_eq!(stored, b"RIFFdata");
    assert_eq!(
        body["location"].as_str().unwrap(),
        blob_root.join(object_key).display().to_string()
    );
    Ok(())
}

#[actix_web::test]
async fn empty_body_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "empty").await;

    let req = test::TestRequest::post()
        .uri("/api/recordings?meetingTitle=Standup&fileName=a.webm")
        .insert_header(("Authorization", user.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(
        resp,
        StatusCode::BAD_REQUEST,
        "INVALID_UPLOAD",
        Some("No file uploaded"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn missing_title_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "notitle").await;

    let req = test::TestRequest::post()
        .uri("/api/recordings?fileName=a.webm")
        .insert_header(("Authorization", user.bearer()))
        .set_payload(&b"abc"[..])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_UPLOAD", None).await;
    Ok(())
}

#[actix_web::test]
async fn list_is_scoped_and_newest_first() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let owner = register_user(&app, "lister").await;
    let other = register_user(&app, "other").await;

    upload_recording(&app, &owner, "First", "one.webm", b"1").await;
    upload_recording(&app, &owner, "Second", "two.webm", b"22").await;
    upload_recording(&app, &other, "Elsewhere", "x.webm", b"333").await;

    let req = test::TestRequest::get()
        .uri("/api/recordings")
        .insert_header(("Authorization", owner.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let titles: Vec<&str> = body["recordings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["meetingTitle"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Second", "First"]);
    Ok(())
}

#[actix_web::test]
async fn deleting_user_removes_recordings_and_blobs() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let blob_root = ctx.blob_dir.path().to_path_buf();
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "cascade").await;

    let body = upload_recording(&app, &user, "Retro", "retro.webm", b"retro").await;
    let object_key = body["recording"]["objectKey"].as_str().unwrap().to_string();
    assert!(blob_root.join(&object_key).exists());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", user.email))
        .insert_header(("Authorization", user.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert!(!blob_root.join(&object_key).exists());
    Ok(())
}
