// /api/users: register, login and the owner-scoped account routes.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use backend_test_support::unique_helpers::unique_email;
use minutes::verify_access_token;
use serde_json::{json, Value};

use crate::support::create_test_app;
use crate::support::factory::{register_user, registration_body, TEST_PASSWORD};
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn register_returns_user_and_token() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let security = ctx.security.clone();
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;

    let email = unique_email("reg");
    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(registration_body(&email))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["firstName"], "Alice");
    assert_eq!(body["user"]["dateOfBirth"], "1990-04-12");
    assert_eq!(body["user"]["gender"], "female");
    assert!(body["user"].get("passwordHash").is_none());

    let claims = verify_access_token(body["token"].as_str().unwrap(), &security)?;
    assert_eq!(claims.sub, body["user"]["id"].as_str().unwrap());
    assert_eq!(claims.email, email);
    assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    Ok(())
}

#[actix_web::test]
async fn register_normalizes_email() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;

    let email = unique_email("norm");
    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(registration_body(&format!("  {}  ", email.to_uppercase())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], email.as_str());
    Ok(())
}

#[actix_web::test]
async fn duplicate_email_in_any_case_conflicts() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "dup").await;

    let req = test::TestRequest::post()
        .uri("/api/users/register")
        .set_json(registration_body(&user.email.to_uppercase()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::CONFLICT, "UNIQUE_EMAIL", None).await;
    Ok(())
}

#[actix_web::test]
async fn register_rejects_bad_fields() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;

    let cases = [
        ("email", json!("not-an-email"), "INVALID_EMAIL"),
        ("firstName", json!("Al"), "INVALID_NAME"),
        ("lastName", json!("x".repeat(51)), "INVALID_NAME"),
        ("password", json!(""), "INVALID_PASSWORD"),
        ("gender", json!("unknown"), "INVALID_GENDER"),
        ("dateOfBirth", json!("12/04/1990"), "VALIDATION_ERROR"),
    ];

    for (field, value, code) in cases {
        let mut body = registration_body(&unique_email("bad"));
        body[field] = value;
        let req = test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_problem_details(resp, StatusCode::BAD_REQUEST, code, None).await;
    }
    Ok(())
}

#[actix_web::test]
async fn login_outcomes() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let security = ctx.security.clone();
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "login").await;

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({"email": unique_email("ghost"), "password": TEST_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND", None).await;

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({"email": user.email, "password": "wrong password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS", None).await;

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({"email": user.email.to_uppercase(), "password": TEST_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["id"], user.id.as_str());
    let claims = verify_access_token(body["token"].as_str().unwrap(), &security)?;
    assert_eq!(claims.sub, user.id);
    Ok(())
}

#[actix_web::test]
async fn email_path_is_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "path").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.email.to_uppercase()))
        .insert_header(("Authorization", user.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], user.email.as_str());
    Ok(())
}

#[actix_web::test]
async fn patch_updates_only_given_fields() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "patch").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", user.email))
        .insert_header(("Authorization", user.bearer()))
        .set_json(json!({"firstName": "  Alicia ", "gender": "OTHER"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["firstName"], "Alicia");
    assert_eq!(body["user"]["lastName"], "Liddell");
    assert_eq!(body["user"]["gender"], "other");
    assert_eq!(body["user"]["dateOfBirth"], "1990-04-12");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}", user.email))
        .insert_header(("Authorization", user.bearer()))
        .set_json(json!({"lastName": "Li"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_NAME", None).await;
    Ok(())
}

#[actix_web::test]
async fn password_change_takes_effect() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "pw").await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/users/{}/password", user.email))
        .insert_header(("Authorization", user.bearer()))
        .set_json(json!({"password": "brand new secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Password updated successfully");

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({"email": user.email, "password": TEST_PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(json!({"email": user.email, "password": "brand new secret"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn delete_removes_account() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "del").await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", user.email))
        .insert_header(("Authorization", user.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User deleted successfully");

    // the token is still valid, the account is gone
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.email))
        .insert_header(("Authorization", user.bearer()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND", None).await;
    Ok(())
}
