//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::TestApp;

/// Test basic health check endpoint returns 200 OK
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_liveness_check() {
    let app = TestApp::new();

    let response = app.get("/health/live", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "alive");
}

/// The in-memory backend has no database to check and is always ready
#[tokio::test]
async fn test_readiness_with_memory_backend() {
    let app = TestApp::new();

    let response = app.get("/health/ready", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["storage"], "memory");
    assert_eq!(response.body["checks"]["database"]["message"], "in-memory storage");
}

#[tokio::test]
async fn test_metrics_expose_request_counters() {
    let app = TestApp::new();
    app.get("/health", None).await;

    let response = app.get("/metrics", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let text = response.body.as_str().unwrap();
    assert!(text.contains("cscoupler_http_requests_total"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/nope", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
