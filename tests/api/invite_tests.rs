//! Invite Link API Tests

use axum::http::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use crate::common::{id_of, representative_body, TestApp};

/// Company with a signed-in founding representative
async fn acme(app: &TestApp) -> (Uuid, String) {
    let company_id = app.signup_company("acme", "ceo@acme.nl").await;
    let token = app.signin("ceo@acme.nl").await;
    (company_id, token)
}

async fn create_link(app: &TestApp, token: &str) -> Value {
    let response = app.post("/representatives/invitelink", Value::Null, Some(token)).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response.body
}

fn signup_path(link: &Value) -> String {
    format!(
        "/signup/representatives/invite/{}/{}",
        link["companyID"].as_str().unwrap(),
        link["id"].as_str().unwrap()
    )
}

#[tokio::test]
async fn test_create_invite_link() {
    let app = TestApp::new();
    let (company_id, token) = acme(&app).await;

    let link = create_link(&app, &token).await;

    assert_eq!(link["companyID"], company_id.to_string());
    assert_eq!(link["used"], false);
    assert_eq!(link["status"], "active");

    let url = link["url"].as_str().unwrap();
    assert!(url.ends_with(&signup_path(&link)), "{}", url);
    assert!(!url.contains("<["));
}

#[tokio::test]
async fn test_invite_round_trip() {
    let app = TestApp::new();
    let (company_id, token) = acme(&app).await;
    let link = create_link(&app, &token).await;

    // Redeem
    let response = app
        .post(&signup_path(&link), representative_body("new@acme.nl"), None)
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    let representative_id = id_of(&response.body);

    // The new representative belongs to the inviting company
    let new_token = app.signin("new@acme.nl").await;
    let representative = app
        .get(&format!("/representatives/{}", representative_id), Some(&new_token))
        .await;
    assert_eq!(representative.status, StatusCode::OK);
    assert_eq!(representative.body["companyID"], company_id.to_string());

    let company = app.get(&format!("/companies/{}", company_id), Some(&token)).await;
    assert_eq!(company.body["representatives"].as_array().unwrap().len(), 2);

    // The link is now used
    let invitations = app.get("/representatives/invitations", Some(&token)).await;
    assert_eq!(invitations.status, StatusCode::OK);
    assert_eq!(invitations.body[0]["used"], true);
    assert_eq!(invitations.body[0]["status"], "used");
}

#[tokio::test]
async fn test_invite_link_is_single_use() {
    let app = TestApp::new();
    let (_, token) = acme(&app).await;
    let link = create_link(&app, &token).await;

    let first = app
        .post(&signup_path(&link), representative_body("one@acme.nl"), None)
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .post(&signup_path(&link), representative_body("two@acme.nl"), None)
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let signin = app
        .post(
            "/signin",
            serde_json::json!({ "email": "two@acme.nl", "password": crate::common::PASSWORD }),
            None,
        )
        .await;
    assert_eq!(signin.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_invite_is_gone() {
    let mut settings = TestApp::settings();
    settings.invite.validity_hours = -1;
    let app = TestApp::with_settings(settings);
    let (_, token) = acme(&app).await;
    let link = create_link(&app, &token).await;
    assert_eq!(link["status"], "expired");

    let response = app
        .post(&signup_path(&link), representative_body("late@acme.nl"), None)
        .await;

    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.body["code"], 10006);

    let invitations = app.get("/representatives/invitations", Some(&token)).await;
    assert_eq!(invitations.body[0]["used"], false);
}

#[tokio::test]
async fn test_unknown_invite_is_not_found() {
    let app = TestApp::new();
    let (company_id, _) = acme(&app).await;

    let response = app
        .post(
            &format!("/signup/representatives/invite/{}/{}", company_id, Uuid::new_v4()),
            representative_body("new@acme.nl"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invite_for_other_company_is_not_found() {
    let app = TestApp::new();
    let (_, token) = acme(&app).await;
    let globex = app.signup_company("globex", "ceo@globex.nl").await;
    let link = create_link(&app, &token).await;

    let response = app
        .post(
            &format!(
                "/signup/representatives/invite/{}/{}",
                globex,
                link["id"].as_str().unwrap()
            ),
            representative_body("new@acme.nl"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invite_with_taken_email_leaves_link_unused() {
    let app = TestApp::new();
    let (_, token) = acme(&app).await;
    app.signup_student("taken@uni.nl").await;
    let link = create_link(&app, &token).await;

    let rejected = app
        .post(&signup_path(&link), representative_body("taken@uni.nl"), None)
        .await;
    assert_eq!(rejected.status, StatusCode::CONFLICT);

    let accepted = app
        .post(&signup_path(&link), representative_body("fresh@acme.nl"), None)
        .await;
    assert_eq!(accepted.status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_invitations_list_newest_first() {
    let app = TestApp::new();
    let (_, token) = acme(&app).await;
    let first = create_link(&app, &token).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create_link(&app, &token).await;

    let response = app.get("/representatives/invitations", Some(&token)).await;

    let links = response.body.as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["id"], second["id"]);
    assert_eq!(links[1]["id"], first["id"]);
}
