use axum::http::StatusCode;
use campus_core::{
    models::account::{AdminListItem, LoginResponse, NewAccount, Role},
    repository::AccountRepository,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, admin_header};

#[tokio::test]
async fn test_register_student() {
    let ctx = TestContext::new();

    let registered = ctx.register_student("jdelacruz").await;

    assert_eq!(registered.acc_user_id, "jdelacruz");
    assert_eq!(registered.acc_role, Role::Student);
    assert_eq!(registered.stud_course, "BSIT");
    assert_eq!(registered.stud_middle_initial.as_deref(), Some("P"));

    // The stored password is hashed
    let account = ctx
        .store
        .find_account_by_user_id("jdelacruz")
        .await
        .unwrap()
        .unwrap();
    assert!(account.password.starts_with("$argon2"));
}

#[tokio::test]
async fn test_register_rejects_duplicate_user_id() {
    let ctx = TestContext::new();
    ctx.register_student("jdelacruz").await;

    let response = ctx
        .server
        .post("/api/accounts/register")
        .json(&json!({
            "userId": "jdelacruz",
            "password": "another",
            "firstName": "Maria",
            "lastName": "Clara",
            "yearLevel": 1,
            "course": "BSN",
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_blank_fields_and_bad_year() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/accounts/register")
        .json(&json!({ "userId": "someone", "yearLevel": 1 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: Missing required fields: password, firstName, lastName, course"
    );

    let response = ctx
        .server
        .post("/api/accounts/register")
        .json(&json!({
            "userId": "someone",
            "password": "pw",
            "firstName": "A",
            "lastName": "B",
            "yearLevel": 0,
            "course": "BSIT",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_and_create_admin_reject_overlong_fields() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/accounts/register")
        .json(&json!({
            "userId": "someone",
            "password": "pw",
            "firstName": "A",
            "middleInitial": "PQ",
            "lastName": "B",
            "yearLevel": 1,
            "course": "BSIT",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: middleInitial must be at most 1 characters"
    );

    ctx.server
        .post("/api/admins")
        .json(&json!({ "userId": "u".repeat(51), "name": "Registrar", "password": "pw" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let admins: Vec<Value> = ctx.server.get("/api/admins").await.json();
    assert!(admins.is_empty());
}

#[tokio::test]
async fn test_login_returns_student_profile() {
    let ctx = TestContext::new();
    let registered = ctx.register_student("jdelacruz").await;

    let response = ctx
        .server
        .post("/api/accounts/login")
        .json(&json!({ "userId": "jdelacruz", "password": "secret123" }))
        .await;

    response.assert_status_ok();
    let login: LoginResponse = response.json();
    assert_eq!(login.acc_index, registered.acc_index);
    assert_eq!(login.role, Role::Student);
    assert_eq!(login.stud_student_id, Some(registered.stud_student_id));
    assert_eq!(login.stud_year_level, Some(2));
}

#[tokio::test]
async fn test_login_rejects_wrong_password_and_unknown_user() {
    let ctx = TestContext::new();
    ctx.register_student("jdelacruz").await;

    let response = ctx
        .server
        .post("/api/accounts/login")
        .json(&json!({ "userId": "jdelacruz", "password": "wrong" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = ctx
        .server
        .post("/api/accounts/login")
        .json(&json!({ "userId": "nobody", "password": "secret123" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_accepts_legacy_plain_text_admin() {
    let ctx = TestContext::new();
    ctx.store
        .create_account(NewAccount {
            user_id: "legacy-admin".to_string(),
            password: "plain".to_string(),
            role: Role::Admin,
            display_name: None,
        })
        .await
        .unwrap();

    let response = ctx
        .server
        .post("/api/accounts/login")
        .json(&json!({ "userId": "legacy-admin", "password": "plain" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["role"], "admin");
    assert!(body.get("studStudentId").is_none());
}

#[tokio::test]
async fn test_admin_lifecycle() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/admins")
        .json(&json!({ "userId": "registrar", "name": "Office of the Registrar", "password": "pw" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: AdminListItem = response.json();
    assert_eq!(created.name, "Office of the Registrar");

    let admins: Vec<AdminListItem> = ctx.server.get("/api/admins").await.json();
    assert_eq!(admins.len(), 1);

    // Deleting needs an admin actor
    let (name, value) = admin_header(created.acc_index);
    ctx.server
        .delete(&format!("/api/admins/{}", created.acc_index))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    // The actor no longer exists
    ctx.server
        .delete(&format!("/api/admins/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_admins_create_admins_after_the_first() {
    let ctx = TestContext::new();
    let first = ctx.create_admin("registrar").await;
    let student = ctx.register_student("jdelacruz").await;
    let request = json!({ "userId": "intruder", "name": "Intruder", "password": "pw" });

    ctx.server
        .post("/api/admins")
        .json(&request)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = admin_header(student.acc_index);
    ctx.server
        .post("/api/admins")
        .add_header(name, value)
        .json(&request)
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let (name, value) = admin_header(first);
    ctx.server
        .post("/api/admins")
        .add_header(name, value)
        .json(&json!({ "userId": "cashier", "name": "Cashier", "password": "pw" }))
        .await
        .assert_status(StatusCode::CREATED);

    let admins: Vec<AdminListItem> = ctx.server.get("/api/admins").await.json();
    let user_ids: Vec<&str> = admins.iter().map(|admin| admin.acc_user_id.as_str()).collect();
    assert_eq!(user_ids, vec!["registrar", "cashier"]);
}

#[tokio::test]
async fn test_delete_admin_unknown_id_is_not_found() {
    let ctx = TestContext::new();
    let admin = ctx.create_admin("registrar").await;
    let (name, value) = admin_header(admin);

    ctx.server
        .delete(&format!("/api/admins/{}", Uuid::new_v4()))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_endpoints_require_admin_header() {
    let ctx = TestContext::new();
    let student = ctx.register_student("jdelacruz").await;

    // Missing header
    ctx.server
        .delete(&format!("/api/students/{}", student.stud_student_id))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // A student account is not an admin
    let (name, value) = admin_header(student.acc_index);
    ctx.server
        .delete(&format!("/api/students/{}", student.stud_student_id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_and_delete_students() {
    let ctx = TestContext::new();
    let student = ctx.register_student("jdelacruz").await;
    ctx.register_student("mclara").await;
    let admin = ctx.create_admin("registrar").await;

    let listed: Vec<Value> = ctx.server.get("/api/students").await.json();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|s| s["accUserId"] == "jdelacruz"));

    let (name, value) = admin_header(admin);
    ctx.server
        .delete(&format!("/api/students/{}", student.stud_student_id))
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    ctx.server
        .delete(&format!("/api/students/{}", student.stud_student_id))
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // The account went with the profile
    assert!(
        ctx.store
            .find_account_by_user_id("jdelacruz")
            .await
            .unwrap()
            .is_none()
    );
}
