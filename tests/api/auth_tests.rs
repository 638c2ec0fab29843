//! Authentication API Tests

use axum::http::{header, StatusCode};
use serde_json::json;

use crate::common::{TestApp, PASSWORD};

/// Signin returns a bearer token and sets the session cookie
#[tokio::test]
async fn test_signin_sets_session_cookie() {
    // Arrange
    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;

    // Act
    let response = app
        .post("/signin", json!({ "email": "ann@uni.nl", "password": PASSWORD }), None)
        .await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["token_type"], "Bearer");
    let token = response.body["token"].as_str().unwrap();
    assert!(!token.is_empty());

    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with(&format!("token={}", token)));
    assert!(cookie.contains("HttpOnly"));
}

/// Wrong password is rejected without revealing which field was wrong
#[tokio::test]
async fn test_signin_with_wrong_password_fails() {
    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;

    let response = app
        .post("/signin", json!({ "email": "ann@uni.nl", "password": "nope" }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

/// Unknown email gets the same answer as a wrong password
#[tokio::test]
async fn test_signin_with_unknown_email_fails() {
    let app = TestApp::new();

    let response = app
        .post("/signin", json!({ "email": "ghost@uni.nl", "password": PASSWORD }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

/// The session cookie alone authenticates a request
#[tokio::test]
async fn test_cookie_authenticates_request() {
    use axum::body::Body;
    use axum::http::Request;

    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let request = Request::builder()
        .uri("/students")
        .header(header::COOKIE, format!("token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
}

/// Signout clears the cookie
#[tokio::test]
async fn test_signout_clears_cookie() {
    use axum::body::Body;
    use axum::http::{Method, Request};

    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/signout")
        .header(header::COOKIE, format!("token={}", token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("token="));
    assert!(cookie.contains("Max-Age=0"));
}

/// A garbage token is rejected
#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = TestApp::new();

    let response = app.get("/students", Some("not-a-jwt")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
