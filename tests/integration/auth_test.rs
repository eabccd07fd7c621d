//! Integration tests for the registration, verification and reset flows.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use userhub_auth::password::PasswordHasher;
use userhub_auth::token::VerificationPayload;
use userhub_core::events::topics;
use userhub_database::UserDirectory;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::new();
    let user_id = app.register_ada().await;

    let events = app.publisher.events_on(topics::USER_CREATED).await;
    assert_eq!(events.len(), 1);
    let payload = events[0].json().unwrap();
    assert_eq!(payload["user"], "ada@example.com");
    assert_eq!(payload["id"], user_id);

    let user = app
        .directory
        .find_by_id(Uuid::parse_str(&user_id).unwrap())
        .await
        .unwrap();
    assert!(!user.email_verified);
    assert!(user.is_active);
}

#[tokio::test]
async fn test_register_response_shape() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Ada L",
                "email": "ada@example.com",
                "password": "Abcdef1!",
                "password2": "Abcdef1!",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["_embedded"]["user_email"], "ada@example.com");
    assert_eq!(
        response.body["_links"]["self"]["href"],
        "http://localhost:8000/auth/register"
    );
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_conflict() {
    let app = TestApp::new();
    app.register_ada().await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Another Ada",
                "email": "ada@example.com",
                "password": "Zyxwvu9@",
                "password2": "Zyxwvu9@",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_register_invalid_input() {
    let app = TestApp::new();

    let mismatch = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Ada L",
                "email": "ada@example.com",
                "password": "Abcdef1!",
                "password2": "Abcdef1?",
            })),
        )
        .await;
    assert_eq!(mismatch.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mismatch.body["error"], "INVALID_PARAMETER");

    let bad_email = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Ada L",
                "email": "ada-at-example",
                "password": "Abcdef1!",
                "password2": "Abcdef1!",
            })),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::UNPROCESSABLE_ENTITY);

    let missing_field = app
        .request("POST", "/auth/register", Some(json!({"email": "ada@example.com"})))
        .await;
    assert_eq!(missing_field.status, StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.directory.is_empty().await);
}

#[tokio::test]
async fn test_verify_email() {
    let app = TestApp::new();
    let user_id = app.register_ada().await;
    let id = Uuid::parse_str(&user_id).unwrap();
    let token = app
        .codec
        .issue(&VerificationPayload {
            id,
            user: "ada@example.com".to_string(),
        })
        .unwrap();

    let response = app
        .request("GET", &format!("/auth/verify-email?token={token}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["_embedded"]["message"],
        format!("The user {user_id} was verified")
    );
    assert!(app.directory.find_by_id(id).await.unwrap().email_verified);
}

#[tokio::test]
async fn test_verify_email_expired() {
    let app = TestApp::new();
    let user_id = app.register_ada().await;
    let id = Uuid::parse_str(&user_id).unwrap();
    let token = app
        .codec
        .issue_at(
            &VerificationPayload {
                id,
                user: "ada@example.com".to_string(),
            },
            Utc::now() - chrono::Duration::seconds(1801),
        )
        .unwrap();

    let response = app
        .request("GET", &format!("/auth/verify-email?token={token}"), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "TOKEN_EXPIRED");
    assert!(!app.directory.find_by_id(id).await.unwrap().email_verified);
}

#[tokio::test]
async fn test_verify_email_garbage_token() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/auth/verify-email?token=not.a.token", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "TOKEN_INVALID");

    let response = app.request("GET", "/auth/verify-email", None).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_resend_verification() {
    let app = TestApp::new();
    app.register_ada().await;

    let response = app
        .request(
            "POST",
            "/auth/resend-verification",
            Some(json!({"email": "ada@example.com"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::ACCEPTED);
    assert_eq!(
        app.publisher
            .events_on(topics::VERIFICATION_TOKEN_CREATED)
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn test_resend_verification_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/resend-verification",
            Some(json!({"email": "nobody@example.com"})),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::new();
    let user_id = app.register_ada().await;

    let response = app
        .request(
            "POST",
            "/auth/request-password-reset",
            Some(json!({"email": "ada@example.com"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    let token = app.last_reset_token().await;
    assert_eq!(
        app.reset_tokens.get(&token).await.unwrap(),
        Some(Uuid::parse_str(&user_id).unwrap())
    );

    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(json!({
                "token": token,
                "password": "Newpass2@",
                "password2": "Newpass2@",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["_embedded"]["message"],
        "The password has been updated successfully. Please log in."
    );

    let user = app
        .directory
        .find_by_id(Uuid::parse_str(&user_id).unwrap())
        .await
        .unwrap();
    assert!(PasswordHasher::new()
        .verify_password("Newpass2@", &user.password_hash)
        .unwrap());
    assert_eq!(app.publisher.events_on(topics::PASSWORD_RESET).await.len(), 1);

    let replay = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(json!({
                "token": token,
                "password": "Other3#xy",
                "password2": "Other3#xy",
            })),
        )
        .await;
    assert_eq!(replay.status, StatusCode::BAD_REQUEST);
    assert_eq!(replay.body["error"], "INVALID_TOKEN");
}

#[tokio::test]
async fn test_reset_password_unknown_token() {
    let app = TestApp::new();
    app.register_ada().await;

    let response = app
        .request(
            "POST",
            "/auth/reset-password",
            Some(json!({
                "token": Uuid::new_v4().to_string(),
                "password": "Newpass2@",
                "password2": "Newpass2@",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "The token already expired or is incorrect"
    );
    assert!(app.publisher.events_on(topics::PASSWORD_RESET).await.is_empty());
}

#[tokio::test]
async fn test_broker_unavailable() {
    let app = TestApp::new();
    app.publisher.set_unavailable(true);

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(json!({
                "full_name": "Ada L",
                "email": "ada@example.com",
                "password": "Abcdef1!",
                "password2": "Abcdef1!",
            })),
        )
        .await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
}
