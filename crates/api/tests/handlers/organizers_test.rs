use axum::http::StatusCode;
use campus_core::models::organizer::Organizer;
use fake::{
    Fake,
    faker::{company::en::CompanyName, name::en::FirstName},
};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_organizer_crud() {
    let ctx = TestContext::new();
    let organization: String = CompanyName().fake();
    let first_name: String = FirstName().fake();

    let response = ctx
        .server
        .post("/api/organizers")
        .json(&json!({
            "firstName": first_name,
            "middleInitial": "",
            "lastName": "Reyes",
            "organization": organization,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Organizer = response.json();
    assert_eq!(created.organization, organization);
    assert_eq!(created.middle_initial, None);

    let fetched: Organizer = ctx
        .server
        .get(&format!("/api/organizers/{}", created.id))
        .await
        .json();
    assert_eq!(fetched, created);

    let response = ctx
        .server
        .put(&format!("/api/organizers/{}", created.id))
        .json(&json!({
            "firstName": first_name,
            "lastName": "Reyes-Santos",
            "organization": organization,
        }))
        .await;
    response.assert_status_ok();
    let updated: Organizer = response.json();
    assert_eq!(updated.last_name, "Reyes-Santos");

    let listed: Vec<Organizer> = ctx.server.get("/api/organizers").await.json();
    assert_eq!(listed.len(), 1);

    ctx.server
        .delete(&format!("/api/organizers/{}", created.id))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .get(&format!("/api/organizers/{}", created.id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_organizer_validation_and_missing_rows() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/organizers")
        .json(&json!({ "firstName": "Ana", "lastName": " " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .post("/api/organizers")
        .json(&json!({
            "firstName": "Ana",
            "lastName": "Reyes",
            "organization": "O".repeat(51),
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    ctx.server
        .put(&format!("/api/organizers/{}", Uuid::new_v4()))
        .json(&json!({ "firstName": "Ana", "lastName": "Reyes", "organization": "Chess Club" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .delete(&format!("/api/organizers/{}", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
