//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. Every `TestApp` runs
//! the full router over its own in-memory store.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use cscoupler::config::Settings;
use cscoupler::startup::{build_router, AppState};

pub const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const PASSWORD: &str = "correct horse battery staple";

/// Response parts captured by the helpers
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    /// Create a new test application over the in-memory backend
    pub fn new() -> Self {
        Self::with_settings(Self::settings())
    }

    /// In-memory settings, for tests that adjust them before building
    pub fn settings() -> Settings {
        Settings::in_memory(JWT_SECRET).expect("test settings")
    }

    pub fn with_settings(settings: Settings) -> Self {
        let state = AppState::new(settings, None).expect("app state");

        Self {
            router: build_router(state),
        }
    }

    /// Send a request with an optional JSON body and bearer token
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    /// Send a prepared request
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, uri, None, token).await
    }

    pub async fn post(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::POST, uri, Some(body), token).await
    }

    pub async fn put(&self, uri: &str, body: Value, token: Option<&str>) -> TestResponse {
        self.request(Method::PUT, uri, Some(body), token).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, uri, None, token).await
    }

    // ========================================================================
    // Fixtures
    // ========================================================================

    /// Register a company with one location; returns its id
    pub async fn signup_company(&self, name: &str, email: &str) -> Uuid {
        let response = self.post("/signup/company", company_body(name, email), None).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(&response.body)
    }

    /// Register a student; returns its id
    pub async fn signup_student(&self, email: &str) -> Uuid {
        let response = self.post("/signup/student", student_body(email), None).await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        id_of(&response.body)
    }

    /// Sign in and return the session token
    pub async fn signin(&self, email: &str) -> String {
        let response = self
            .post("/signin", json!({ "email": email, "password": PASSWORD }), None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }
}

pub fn user_body(email: &str) -> Value {
    json!({
        "email": email,
        "password": PASSWORD,
        "firstname": "Ann",
        "lastname": "Bos"
    })
}

pub fn representative_body(email: &str) -> Value {
    json!({ "jobTitle": "CEO", "user": user_body(email) })
}

pub fn company_body(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "information": "Software house",
        "description": "We build things",
        "locations": [{ "street": "Main Street", "zipcode": "1234 AB", "city": "Utrecht", "number": "1" }],
        "representatives": [representative_body(email)]
    })
}

pub fn student_body(email: &str) -> Value {
    json!({
        "university": "Hogeschool Utrecht",
        "skills": ["rust", "sql"],
        "experience": [],
        "status": "available",
        "user": user_body(email)
    })
}

pub fn id_of(body: &Value) -> Uuid {
    body["id"].as_str().and_then(|s| s.parse().ok()).expect("response id")
}
