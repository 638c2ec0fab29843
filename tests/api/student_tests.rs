//! Student API Tests

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use uuid::Uuid;

use crate::common::{student_body, TestApp};

const BOUNDARY: &str = "cscoupler-test-boundary";

fn resume_request(student_id: Uuid, token: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"resume\"; filename=\"cv.pdf\"\r\n");
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::PUT)
        .uri(format!("/students/{}/resume", student_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_signup_then_read_back() {
    let app = TestApp::new();
    let student_id = app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let response = app.get(&format!("/students/{}", student_id), Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["university"], "hogeschool utrecht");
    assert_eq!(response.body["skills"], json!(["rust", "sql"]));
    assert_eq!(response.body["status"], "available");
    assert_eq!(response.body["user"]["email"], "ann@uni.nl");
    assert_eq!(response.body["user"]["role"], "student");
    assert!(response.body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_signup_with_taken_email_conflicts() {
    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;

    let response = app.post("/signup/student", student_body("ann@uni.nl"), None).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_with_invalid_email_fails() {
    let app = TestApp::new();

    let response = app.post("/signup/student", student_body("not-an-email"), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], 10007);
    assert_eq!(response.body["message"], "user.email: Invalid email format");
    assert_eq!(response.body["errors"][0]["field"], "user.email");
}

#[tokio::test]
async fn test_list_students() {
    let app = TestApp::new();
    app.signup_student("ann@uni.nl").await;
    app.signup_student("bob@uni.nl").await;
    let token = app.signin("bob@uni.nl").await;

    let response = app.get("/students", Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::new();
    let student_id = app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let response = app
        .put(
            &format!("/students/{}", student_id),
            json!({ "university": "TU Delft", "status": "unavailable" }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let student = app.get(&format!("/students/{}", student_id), Some(&token)).await;
    assert_eq!(student.body["university"], "tu delft");
    assert_eq!(student.body["status"], "unavailable");
    assert_eq!(student.body["skills"], json!(["rust", "sql"]));
}

#[tokio::test]
async fn test_update_other_student_is_forbidden() {
    let app = TestApp::new();
    let ann = app.signup_student("ann@uni.nl").await;
    app.signup_student("bob@uni.nl").await;
    let bob_token = app.signin("bob@uni.nl").await;

    let response = app
        .put(&format!("/students/{}", ann), json!({ "university": "X" }), Some(&bob_token))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_upload_pdf_resume() {
    let app = TestApp::new();
    let student_id = app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let response = app
        .send(resume_request(student_id, &token, "application/pdf", b"%PDF-1.4\n%test\n"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["resume"].as_str().unwrap().ends_with(".pdf"));
}

#[tokio::test]
async fn test_upload_non_pdf_resume_is_rejected() {
    let app = TestApp::new();
    let student_id = app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let response = app
        .send(resume_request(student_id, &token, "text/plain", b"hello"))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_own_account() {
    let app = TestApp::new();
    let student_id = app.signup_student("ann@uni.nl").await;
    let token = app.signin("ann@uni.nl").await;

    let response = app.delete(&format!("/students/{}", student_id), Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let signin = app
        .post("/signin", json!({ "email": "ann@uni.nl", "password": crate::common::PASSWORD }), None)
        .await;
    assert_eq!(signin.status, StatusCode::UNAUTHORIZED);
}
