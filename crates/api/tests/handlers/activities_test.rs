use axum::http::StatusCode;
use campus_core::models::{
    activity::{Activity, ActivityState, SUBMITTED_NOTIFY},
    organizer::Organizer,
    status::ActivityStatus,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, admin_header};

async fn create_organizer(ctx: &TestContext) -> Organizer {
    ctx.server
        .post("/api/organizers")
        .json(&json!({ "firstName": "Ana", "lastName": "Reyes", "organization": "Chess Club" }))
        .await
        .json()
}

async fn request_activity(ctx: &TestContext, student_id: &str, organizer_id: Uuid) -> Activity {
    let response = ctx
        .server
        .post("/api/activities/request")
        .json(&json!({
            "studentId": student_id,
            "organizerId": organizer_id,
            "activityName": "Open Tournament",
            "description": "Friendly rapid games",
            "scheduledDate": "2025-11-20T09:00:00Z",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_request_and_approve_activity() {
    let ctx = TestContext::new();
    let student = ctx.register_student("jdelacruz").await;
    let organizer = create_organizer(&ctx).await;
    let admin = ctx.create_admin("registrar").await;

    let activity = request_activity(&ctx, &student.stud_student_id, organizer.id).await;
    assert_eq!(activity.status, ActivityState::Pending);
    assert!(!activity.is_granted);

    let (name, value) = admin_header(admin);
    let response = ctx
        .server
        .put(&format!("/api/activities/{}/approve", activity.id))
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let approved: Activity = response.json();
    assert_eq!(approved.status, ActivityState::Approved);
    assert!(approved.is_granted);

    let statuses: Vec<ActivityStatus> = ctx
        .server
        .get(&format!("/api/activities/{}/statuses", activity.id))
        .await
        .json();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0].notify, SUBMITTED_NOTIFY);
    assert_eq!(statuses[0].actor_account_id, None);
    assert_eq!(statuses[1].status, ActivityState::Approved);
    assert_eq!(statuses[1].actor_account_id, Some(admin));
}

#[tokio::test]
async fn test_decline_activity() {
    let ctx = TestContext::new();
    let student = ctx.register_student("jdelacruz").await;
    let organizer = create_organizer(&ctx).await;
    let admin = ctx.create_admin("registrar").await;
    let activity = request_activity(&ctx, &student.stud_student_id, organizer.id).await;

    let (name, value) = admin_header(admin);
    let declined: Activity = ctx
        .server
        .put(&format!("/api/activities/{}/decline", activity.id))
        .add_header(name, value)
        .await
        .json();

    assert_eq!(declined.status, ActivityState::Declined);
    assert!(!declined.is_granted);
}

#[tokio::test]
async fn test_list_activities_embeds_student_and_organizer() {
    let ctx = TestContext::new();
    let student = ctx.register_student("jdelacruz").await;
    let organizer = create_organizer(&ctx).await;
    request_activity(&ctx, &student.stud_student_id, organizer.id).await;

    let listed: Vec<Value> = ctx.server.get("/api/activities").await.json();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["status"], "Pending");
    assert_eq!(listed[0]["student"]["studentId"], student.stud_student_id.as_str());
    assert_eq!(listed[0]["organizer"]["organization"], "Chess Club");
}

#[tokio::test]
async fn test_request_activity_failures() {
    let ctx = TestContext::new();
    let student = ctx.register_student("jdelacruz").await;
    let organizer = create_organizer(&ctx).await;

    // Missing scheduled date
    ctx.server
        .post("/api/activities/request")
        .json(&json!({
            "studentId": student.stud_student_id,
            "organizerId": organizer.id,
            "activityName": "Open Tournament",
            "description": "Friendly rapid games",
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    // Unknown student
    ctx.server
        .post("/api/activities/request")
        .json(&json!({
            "studentId": "99999999",
            "organizerId": organizer.id,
            "activityName": "Open Tournament",
            "description": "Friendly rapid games",
            "scheduledDate": "2025-11-20T09:00:00Z",
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Unknown organizer
    ctx.server
        .post("/api/activities/request")
        .json(&json!({
            "studentId": student.stud_student_id,
            "organizerId": Uuid::new_v4(),
            "activityName": "Open Tournament",
            "description": "Friendly rapid games",
            "scheduledDate": "2025-11-20T09:00:00Z",
        }))
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Description wider than the column
    ctx.server
        .post("/api/activities/request")
        .json(&json!({
            "studentId": student.stud_student_id,
            "organizerId": organizer.id,
            "activityName": "Open Tournament",
            "description": "d".repeat(201),
            "scheduledDate": "2025-11-20T09:00:00Z",
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_decisions_on_unknown_activity() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin("registrar").await;
    let (name, value) = admin_header(admin);

    ctx.server
        .put(&format!("/api/activities/{}/approve", Uuid::new_v4()))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    ctx.server
        .get(&format!("/api/activities/{}/statuses", Uuid::new_v4()))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
