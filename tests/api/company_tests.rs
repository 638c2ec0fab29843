//! Company API Tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{company_body, id_of, representative_body, TestApp};

#[tokio::test]
async fn test_company_signup_reads_back_end_to_end() {
    // Arrange
    let app = TestApp::new();
    let company_id = app.signup_company("acme", "ceo@acme.nl").await;
    let token = app.signin("ceo@acme.nl").await;

    // Act
    let response = app.get(&format!("/companies/{}", company_id), Some(&token)).await;

    // Assert
    assert_eq!(response.status, StatusCode::OK);
    let company = &response.body;
    assert_eq!(company["name"], "acme");
    assert_eq!(company["locations"].as_array().unwrap().len(), 1);
    assert_eq!(company["locations"][0]["city"], "utrecht");
    assert!(company["projects"].as_array().unwrap().is_empty());

    let representatives = company["representatives"].as_array().unwrap();
    assert_eq!(representatives.len(), 1);
    assert_eq!(representatives[0]["jobTitle"], "ceo");
    assert_eq!(representatives[0]["companyID"], company_id.to_string());
    assert_eq!(representatives[0]["user"]["role"], "representative");
}

#[tokio::test]
async fn test_company_name_is_public() {
    let app = TestApp::new();
    let company_id = app.signup_company("acme", "ceo@acme.nl").await;

    let response = app.get(&format!("/companies/{}/name", company_id), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "name": "acme" }));
}

#[tokio::test]
async fn test_unknown_company_name_is_not_found() {
    let app = TestApp::new();

    let response = app
        .get(&format!("/companies/{}/name", uuid::Uuid::new_v4()), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_company_signup_requires_exactly_one_representative() {
    let app = TestApp::new();
    let mut body = company_body("acme", "ceo@acme.nl");
    body["representatives"] = json!([representative_body("a@acme.nl"), representative_body("b@acme.nl")]);

    let response = app.post("/signup/company", body, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_company_signup_with_blank_description_lists_field() {
    let app = TestApp::new();
    let mut body = company_body("acme", "ceo@acme.nl");
    body["description"] = json!("");

    let response = app.post("/signup/company", body, None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["errors"][0]["field"], "description");
    assert_eq!(response.body["errors"][0]["message"], "Description is required");
}

#[tokio::test]
async fn test_company_signup_with_taken_name_conflicts() {
    let app = TestApp::new();
    app.signup_company("acme", "ceo@acme.nl").await;

    let response = app
        .post("/signup/company", company_body("acme", "other@acme.nl"), None)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_company_signup_with_taken_email_conflicts() {
    let app = TestApp::new();
    app.signup_student("ceo@acme.nl").await;

    let response = app
        .post("/signup/company", company_body("acme", "ceo@acme.nl"), None)
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_representative_publishes_project() {
    let app = TestApp::new();
    let company_id = app.signup_company("acme", "ceo@acme.nl").await;
    let token = app.signin("ceo@acme.nl").await;

    let response = app
        .post(
            "/representatives/projects",
            json!({
                "description": "Build a parser",
                "compensation": "500 EUR",
                "duration": "10 weeks",
                "recommendations": ["rust"]
            }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let project_id = id_of(&response.body);

    let company = app.get(&format!("/companies/{}", company_id), Some(&token)).await;
    let projects = company.body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], project_id.to_string());
    assert_eq!(projects[0]["companyID"], company_id.to_string());

    let all = app.get("/projects", Some(&token)).await;
    assert_eq!(all.body.as_array().unwrap().len(), 1);

    let deleted = app.delete(&format!("/projects/{}", project_id), Some(&token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_other_company_cannot_delete_project() {
    let app = TestApp::new();
    app.signup_company("acme", "ceo@acme.nl").await;
    app.signup_company("globex", "ceo@globex.nl").await;
    let acme = app.signin("ceo@acme.nl").await;
    let globex = app.signin("ceo@globex.nl").await;

    let created = app
        .post(
            "/representatives/projects",
            json!({ "description": "d", "compensation": "c", "duration": "1 week" }),
            Some(&acme),
        )
        .await;
    let project_id = id_of(&created.body);

    let response = app.delete(&format!("/projects/{}", project_id), Some(&globex)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_company_adds_location_and_keeps_existing() {
    let app = TestApp::new();
    let company_id = app.signup_company("acme", "ceo@acme.nl").await;
    let token = app.signin("ceo@acme.nl").await;

    let response = app
        .put(
            &format!("/companies/{}", company_id),
            json!({
                "name": "acme labs",
                "locations": [{ "street": "Side Street", "zipcode": "5678 CD", "city": "Delft", "number": "2" }]
            }),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let company = app.get(&format!("/companies/{}", company_id), Some(&token)).await;
    assert_eq!(company.body["name"], "acme labs");
    assert_eq!(company.body["description"], "we build things");
    assert_eq!(company.body["locations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_update_other_company_is_forbidden() {
    let app = TestApp::new();
    let acme = app.signup_company("acme", "ceo@acme.nl").await;
    app.signup_company("globex", "ceo@globex.nl").await;
    let globex = app.signin("ceo@globex.nl").await;

    let response = app
        .put(&format!("/companies/{}", acme), json!({ "name": "mine now" }), Some(&globex))
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
