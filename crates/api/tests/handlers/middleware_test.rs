use axum::{body::to_bytes, http::StatusCode};
use campus_api::middleware::{auth, error_handling::map_error};
use campus_core::errors::CampusError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[case::not_found(CampusError::NotFound("Student 2504225 not found".into()), StatusCode::NOT_FOUND)]
#[case::validation(CampusError::Validation("spot is required".into()), StatusCode::BAD_REQUEST)]
#[case::precondition(CampusError::Precondition("no active parking".into()), StatusCode::BAD_REQUEST)]
#[case::conflict(CampusError::Conflict("Parking spot B3 is already reserved".into()), StatusCode::CONFLICT)]
#[case::authentication(CampusError::Authentication("bad password".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(CampusError::Authorization("not an admin".into()), StatusCode::FORBIDDEN)]
#[case::database(CampusError::Database(eyre::eyre!("connection reset")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::internal(
    CampusError::Internal(Box::new(std::io::Error::other("disk full"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: CampusError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

async fn error_body(error: CampusError) -> Value {
    let body = to_bytes(map_error(error).into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_server_error_body_hides_cause() {
    let body = error_body(CampusError::Database(eyre::eyre!(
        "value too long for type character varying(8)"
    )))
    .await;
    assert_eq!(body, json!({ "error": "Internal server error" }));

    let body = error_body(CampusError::Internal(Box::new(std::io::Error::other("disk full")))).await;
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[tokio::test]
async fn test_client_error_body_keeps_message() {
    let body = error_body(CampusError::Conflict("Parking spot B3 is already reserved".into())).await;
    assert_eq!(
        body,
        json!({ "error": "Conflict: Parking spot B3 is already reserved" })
    );
}

#[test]
fn test_hash_password() {
    let hashed = auth::hash_password("test_password").unwrap();

    // Verify the hash is different from the original password
    assert_ne!(hashed, "test_password");
    assert!(hashed.starts_with("$argon2"));

    assert!(auth::verify_password(&hashed, "test_password"));
    assert!(!auth::verify_password(&hashed, "wrong_password"));
}

#[test]
fn test_verify_legacy_plain_text_password() {
    assert!(auth::verify_password("letmein", "letmein"));
    assert!(!auth::verify_password("letmein", "LETMEIN"));
}

#[test]
fn test_verify_rejects_malformed_hash() {
    assert!(!auth::verify_password("$argon2id$garbage", "$argon2id$garbage"));
}
