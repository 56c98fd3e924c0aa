// Bearer token handling on protected routes.

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use minutes::SecurityConfig;

use crate::support::auth::{bearer_header, mint_expired_token};
use crate::support::create_test_app;
use crate::support::factory::register_user;
use crate::support::test_state::build_test_state;

#[actix_web::test]
async fn missing_header_is_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "nohdr").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.email))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(
        resp,
        StatusCode::FORBIDDEN,
        "NO_TOKEN",
        Some("No token provided"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn non_bearer_scheme_is_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;

    let req = test::TestRequest::get()
        .uri("/api/recordings")
        .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::FORBIDDEN, "NO_TOKEN", None).await;
    Ok(())
}

#[actix_web::test]
async fn token_signed_with_other_secret_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "wrongsecret").await;

    let other = SecurityConfig::new(b"some_other_secret".to_vec());
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.email))
        .insert_header(("Authorization", bearer_header(&user.id, &user.email, &other)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(
        resp,
        StatusCode::FORBIDDEN,
        "INVALID_TOKEN",
        Some("Failed to authenticate token"),
    )
    .await;
    Ok(())
}

#[actix_web::test]
async fn expired_token_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let security = ctx.security.clone();
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "expired").await;

    let token = mint_expired_token(&user.id, &user.email, &security);
    let req = test::TestRequest::get()
        .uri("/api/recordings")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::FORBIDDEN, "INVALID_TOKEN", None).await;
    Ok(())
}

#[actix_web::test]
async fn garbage_token_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/mail/summary")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .set_json(serde_json::json!({"objectKey": "k", "message": "m"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::FORBIDDEN, "INVALID_TOKEN", None).await;
    Ok(())
}

#[actix_web::test]
async fn lowercase_scheme_is_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;
    let user = register_user(&app, "lower").await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user.email))
        .insert_header(("Authorization", format!("bearer {}", user.token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    Ok(())
}

#[actix_web::test]
async fn public_routes_need_no_token() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_test_state().await?;
    let app = create_test_app(ctx.state).with_prod_routes().build().await?;

    // reaches the handler, which rejects the unknown account
    let req = test::TestRequest::post()
        .uri("/api/users/login")
        .set_json(serde_json::json!({"email": "ghost@example.test", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem_details(resp, StatusCode::NOT_FOUND, "USER_NOT_FOUND", None).await;
    Ok(())
}
