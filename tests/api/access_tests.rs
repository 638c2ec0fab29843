//! Role and authentication gating

use axum::http::StatusCode;
use serde_json::{json, Value};

use crate::common::TestApp;

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    for uri in ["/students", "/companies", "/projects", "/representatives/invitations"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let response = app.post("/representatives/invitelink", Value::Null, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_cannot_create_invite_link() {
    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let response = app.post("/representatives/invitelink", Value::Null, Some(&token)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_student_cannot_publish_project() {
    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let response = app
        .post(
            "/representatives/projects",
            json!({ "description": "d", "compensation": "c", "duration": "1 week" }),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_representative_cannot_edit_student() {
    let app = TestApp::new();
    let student_id = app.signup_student("ann@uni.nl").await;
    app.signup_company("acme", "ceo@acme.nl").await;
    let token = app.signin("ceo@acme.nl").await;

    let response = app
        .put(&format!("/students/{}", student_id), json!({ "university": "X" }), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let app = TestApp::new();
    let claims = json!({
        "sub": uuid::Uuid::new_v4(),
        "email": "ann@uni.nl",
        "role": "student",
        "role_id": uuid::Uuid::new_v4(),
        "iat": chrono::Utc::now().timestamp(),
        "exp": chrono::Utc::now().timestamp() + 3600
    });
    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"some-other-secret")).unwrap();

    let response = app.get("/students", Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
