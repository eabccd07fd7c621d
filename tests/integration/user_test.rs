//! Integration tests for user administration.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_get_user_hides_hash() {
    let app = TestApp::new();
    let id = app.register_ada().await;

    let response = app.request("GET", &format!("/users/{id}"), None).await;

    assert_eq!(response.status, StatusCode::OK);
    let user = &response.body["_embedded"];
    assert_eq!(user["email"], "ada@example.com");
    assert_eq!(user["email_verified"], false);
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_deactivate_then_reset_request_not_found() {
    let app = TestApp::new();
    let id = app.register_ada().await;

    let response = app
        .request("POST", &format!("/users/{id}/deactivate"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["_embedded"]["is_active"], false);

    let response = app
        .request(
            "POST",
            "/auth/request-password-reset",
            Some(serde_json::json!({"email": "ada@example.com"})),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let id = app.register_ada().await;

    let response = app.request("DELETE", &format!("/users/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/users/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id() {
    let app = TestApp::new();
    let response = app.request("GET", "/users/not-a-uuid", None).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}
