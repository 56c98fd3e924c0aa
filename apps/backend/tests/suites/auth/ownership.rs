// A valid token only opens the resources its subject owns.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use serde_json::{json, Value};

use crate::support::create_test_app;
use crate::support::factory::{register_user, TEST_PASSWORD};
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn owner_reads_own_account() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let u1 = register_user(&app, "owner").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", u1.email))
        .insert_header(("Authorization", u1.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], u1.id.as_str());
    assert!(body["user"].get("passwordHash").is_none());
    Ok(())
}

#[actix_web::test]
async fn other_users_account_is_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let u1 = register_user(&app, "u1").await;
    let u2 = register_user(&app, "u2").await;

    let read = test::TestRequest::get()
        .uri(&format!("/api/users/{}", u2.email))
        .insert_header(("Authorization", u1.bearer()))
        .to_request();
    let resp = test::call_service(&app, read).await;
    assert_problem_details(
        resp,
        StatusCode::FORBIDDEN,
        "FORBIDDEN",
        Some("Unauthorized access to this resource"),
    )
    .await;

    let patch = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", u2.email))
        .insert_header(("Authorization", u1.bearer()))
        .set_json(json!({"firstName": "Mallory"}))
        .to_request();
    let resp = test::call_service(&app, patch).await;
    assert_problem_details(resp, StatusCode::FORBIDDEN, "FORBIDDEN", None).await;

    let delete = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", u2.email))
        .insert_header(("Authorization", u1.bearer()))
        .to_request();
    let resp = test::call_service(&app, delete).await;
    assert_problem_details(resp, StatusCode::FORBIDDEN, "FORBIDDEN", None).await;

    // u2 is untouched
    let read = test::TestRequest::get()
        .uri(&format!("/api/users/{}", u2.email))
        .insert_header(("Authorization", u2.bearer()))
        .to_request();
    let resp = test::call_service(&app, read).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["firstName"], "Alice");
    Ok(())
}

#[actix_web::test]
async fn missing_account_is_not_found_before_ownership() -> Result<(), Box<dyn std::error::Error>>
{
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let u1 = register_user(&app, "lookup").await;

    let req = test::TestRequest::get()
        .uri("/api/users/nobody@example.test")
        .insert_header(("Authorization", u1.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND", None).await;

    let req = test::TestRequest::get()
        .uri("/api/users/not-an-email")
        .insert_header(("Authorization", u1.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_EMAIL", None).await;
    Ok(())
}

#[actix_web::test]
async fn other_users_account_is_forbidden_under_any_email_case(
) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let u1 = register_user(&app, "case1").await;
    let u2 = register_user(&app, "case2").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", u2.email.to_uppercase()))
        .insert_header(("Authorization", u1.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::FORBIDDEN, "FORBIDDEN", None).await;

    // The owner still resolves the same account through the uppercase path.
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", u2.email.to_uppercase()))
        .insert_header(("Authorization", u2.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], u2.id.as_str());
    Ok(())
}

#[actix_web::test]
async fn other_users_password_cannot_be_changed() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let u1 = register_user(&app, "pw1").await;
    let u2 = register_user(&app, "pw2").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}/password", u2.email))
        .insert_header(("Authorization", u1.bearer()))
        .set_json(json!({"password": "taken over"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::FORBIDDEN, "FORBIDDEN", None).await;

    let login = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({"email": u2.email, "password": TEST_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let login = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({"email": u2.email, "password": "taken over"}))
        .to_request();
    let resp = test::call_service(&app, login).await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", None).await;
    Ok(())
}
