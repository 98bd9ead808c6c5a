use axum::http::StatusCode;
use campus_core::{
    errors::CampusError,
    models::{
        reservation::{Locker, Parking, ParkingSchedule, ParkingStatusResponse},
        status::{LockerStatus, ParkingStatus},
    },
};
use campus_db::mock::repositories::MockReservationStore;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

use crate::test_utils::{TestContext, admin_header};

async fn reserve_parking(ctx: &TestContext, student_id: &str, spot: &str) -> axum_test::TestResponse {
    ctx.server
        .post("/reservations/parking")
        .json(&json!({
            "studentId": student_id,
            "spot": spot,
            "vehicleType": "car",
            "vehicleModel": "Toyota Vios",
            "schedule": "pm",
        }))
        .await
}

async fn reserve_locker(ctx: &TestContext, student_id: &str, spot: &str) -> axum_test::TestResponse {
    ctx.server
        .post("/reservations/lockers")
        .json(&json!({ "studentId": student_id, "spot": spot }))
        .await
}

async fn parking_active(ctx: &TestContext, student_id: &str) -> bool {
    let status: ParkingStatusResponse = ctx
        .server
        .get(&format!("/reservations/parking/status/{student_id}"))
        .await
        .json();
    status.active
}

#[tokio::test]
async fn test_reservation_walkthrough() {
    let ctx = TestContext::new();
    let s1 = ctx.register_student("s1").await.stud_student_id;
    let s2 = ctx.register_student("s2").await.stud_student_id;

    // S1 reserves B3; the schedule is stored upper-case
    let response = reserve_parking(&ctx, &s1, "B3").await;
    response.assert_status(StatusCode::CREATED);
    let parking: Parking = response.json();
    assert_eq!(parking.schedule, ParkingSchedule::Pm);
    assert_eq!(parking.spot, "B3");
    assert!(parking_active(&ctx, &s1).await);

    let body: Value = response.json();
    assert_eq!(body["schedule"], "PM");

    // S2 cannot take B3
    reserve_parking(&ctx, &s2, "B3")
        .await
        .assert_status(StatusCode::CONFLICT);

    // S1 takes locker C1
    reserve_locker(&ctx, &s1, "C1")
        .await
        .assert_status(StatusCode::CREATED);

    // Releasing parking frees B3
    ctx.server
        .post(&format!("/reservations/parking/release/{s1}"))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(!parking_active(&ctx, &s1).await);
    reserve_parking(&ctx, &s2, "b3")
        .await
        .assert_status(StatusCode::CREATED);

    // Without parking S1 cannot take another locker, but keeps C1
    let response = reserve_locker(&ctx, &s1, "D4").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().starts_with("Precondition failed"));

    let lockers: Vec<Value> = ctx.server.get("/reservations/lockers").await.json();
    assert_eq!(lockers.len(), 1);
    assert_eq!(lockers[0]["spot"], "C1");
    assert_eq!(lockers[0]["isAvailable"], false);
    assert_eq!(lockers[0]["student"]["studentId"], s1.as_str());
}

#[tokio::test]
async fn test_reserve_parking_validation() {
    let ctx = TestContext::new();
    let student = ctx.register_student("s1").await.stud_student_id;

    let response = ctx
        .server
        .post("/reservations/parking")
        .json(&json!({ "studentId": student, "spot": "B3" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        "Validation error: Missing required fields: vehicleType, vehicleModel, schedule"
    );

    ctx.server
        .post("/reservations/parking")
        .json(&json!({
            "studentId": student,
            "spot": "B3",
            "vehicleType": "car",
            "vehicleModel": "Toyota Vios",
            "schedule": "pm",
            "reservationDate": "2025-06-02T08:00:00Z",
            "expiryDate": "2025-06-01T08:00:00Z",
        }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    reserve_parking(&ctx, "99999999", "B3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[rstest]
#[case::spot(json!({ "spot": "PARKINGSPOT1" }), "spot must be at most 8 characters")]
#[case::vehicle_model(
    json!({ "vehicleModel": "Toyota Vios 1.3 XLE CVT Special Edition" }),
    "vehicleModel must be at most 30 characters"
)]
#[case::vehicle_type(json!({ "vehicleType": "x".repeat(31) }), "vehicleType must be at most 30 characters")]
#[tokio::test]
async fn test_reserve_parking_rejects_overlong_fields(#[case] overrides: Value, #[case] message: &str) {
    let ctx = TestContext::new();
    let student = ctx.register_student("s1").await.stud_student_id;
    let mut body = json!({
        "studentId": student,
        "spot": "B3",
        "vehicleType": "car",
        "vehicleModel": "Toyota Vios",
        "schedule": "am",
    });
    for (key, value) in overrides.as_object().unwrap() {
        body[key] = value.clone();
    }

    let response = ctx.server.post("/reservations/parking").json(&body).await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let error: Value = response.json();
    assert_eq!(error["error"], format!("Validation error: {message}"));
    assert!(!parking_active(&ctx, &student).await);
}

#[tokio::test]
async fn test_reserve_locker_rejects_overlong_spot() {
    let ctx = TestContext::new();
    let student = ctx.register_student("s1").await.stud_student_id;
    reserve_parking(&ctx, &student, "A1").await;

    reserve_locker(&ctx, &student, "LOCKERSPOT1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let lockers: Vec<Value> = ctx.server.get("/reservations/lockers").await.json();
    assert!(lockers.is_empty());
}

#[tokio::test]
async fn test_second_parking_for_same_student_conflicts() {
    let ctx = TestContext::new();
    let student = ctx.register_student("s1").await.stud_student_id;

    reserve_parking(&ctx, &student, "A1")
        .await
        .assert_status(StatusCode::CREATED);
    reserve_parking(&ctx, &student, "A2")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_release_parking_twice() {
    let ctx = TestContext::new();
    let student = ctx.register_student("s1").await.stud_student_id;
    reserve_parking(&ctx, &student, "A1").await;

    let path = format!("/reservations/parking/release/{student}");
    ctx.server
        .post(&path)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .post(&path)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let history: Vec<ParkingStatus> = ctx
        .server
        .get(&format!("/reservations/parking/history/{student}"))
        .await
        .json();
    assert_eq!(history.len(), 1);
    assert!(history[0].is_available);
}

#[tokio::test]
async fn test_locker_spot_conflict() {
    let ctx = TestContext::new();
    let s1 = ctx.register_student("s1").await.stud_student_id;
    let s2 = ctx.register_student("s2").await.stud_student_id;
    reserve_parking(&ctx, &s1, "A1").await;
    reserve_parking(&ctx, &s2, "A2").await;

    reserve_locker(&ctx, &s1, "C1")
        .await
        .assert_status(StatusCode::CREATED);
    reserve_locker(&ctx, &s2, " c1 ")
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_releases_locker() {
    let ctx = TestContext::new();
    let student = ctx.register_student("s1").await.stud_student_id;
    let admin = ctx.create_admin("registrar").await;
    reserve_parking(&ctx, &student, "A1").await;
    let locker: Locker = reserve_locker(&ctx, &student, "C1").await.json();

    // Only admins may release lockers
    ctx.server
        .post("/reservations/lockers/release/C1")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let (name, value) = admin_header(admin);
    ctx.server
        .post("/reservations/lockers/release/c1")
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .post("/reservations/lockers/release/C1")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let history: Vec<LockerStatus> = ctx
        .server
        .get("/reservations/lockers/history/C1")
        .await
        .json();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].locker_id, locker.id);
    assert_eq!(history[0].actor_account_id, Some(admin));
}

#[tokio::test]
async fn test_admin_vacates_parking_spot() {
    let ctx = TestContext::new();
    let s1 = ctx.register_student("s1").await.stud_student_id;
    let s2 = ctx.register_student("s2").await.stud_student_id;
    let admin = ctx.create_admin("registrar").await;
    reserve_parking(&ctx, &s1, "B3").await;
    reserve_locker(&ctx, &s1, "C1").await;

    ctx.server
        .post("/reservations/parking/release-spot/B3")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // A student account is not an administrator
    let student_account = ctx.register_student("s3").await.acc_index;
    let (name, value) = admin_header(student_account);
    ctx.server
        .post("/reservations/parking/release-spot/B3")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::FORBIDDEN);
    assert!(parking_active(&ctx, &s1).await);

    let (name, value) = admin_header(admin);
    ctx.server
        .post("/reservations/parking/release-spot/b3")
        .add_header(name.clone(), value.clone())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    ctx.server
        .post("/reservations/parking/release-spot/B3")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(!parking_active(&ctx, &s1).await);

    let history: Vec<ParkingStatus> = ctx
        .server
        .get(&format!("/reservations/parking/history/{s1}"))
        .await
        .json();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].actor_account_id, Some(admin));

    // The occupant keeps the locker and the spot goes to the next student
    let lockers: Vec<Value> = ctx.server.get("/reservations/lockers").await.json();
    assert_eq!(lockers[0]["isAvailable"], false);
    reserve_parking(&ctx, &s2, "B3")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_list_parking_includes_released_rows() {
    let ctx = TestContext::new();
    let student = ctx.register_student("s1").await.stud_student_id;
    reserve_parking(&ctx, &student, "A1").await;
    ctx.server
        .post(&format!("/reservations/parking/release/{student}"))
        .await;
    reserve_parking(&ctx, &student, "A2").await;

    let listed: Vec<Value> = ctx.server.get("/reservations/parking").await.json();

    let states: Vec<(&str, bool)> = listed
        .iter()
        .map(|row| (row["spot"].as_str().unwrap(), row["isAvailable"].as_bool().unwrap()))
        .collect();
    assert_eq!(states, vec![("A1", true), ("A2", false)]);
}

#[test_log::test(tokio::test)]
async fn test_store_failure_is_a_server_error() {
    let mut store = MockReservationStore::new();
    store
        .expect_list_parking()
        .times(1)
        .returning(|| Err(CampusError::Database(eyre::eyre!("connection reset"))));
    store
        .expect_find_active_parking()
        .returning(|_| Err(CampusError::Database(eyre::eyre!("connection reset"))));
    let ctx = TestContext::with_reservation_store(store);

    let response = ctx.server.get("/reservations/parking").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Internal server error");
    assert!(!response.text().contains("connection reset"));

    ctx.server
        .get("/reservations/parking/status/2504225")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_store_conflict_passes_through() {
    let mut store = MockReservationStore::new();
    store
        .expect_reserve_locker()
        .withf(|locker| locker.spot == "C1" && locker.student_id == "2504225")
        .returning(|locker| {
            Err(CampusError::Conflict(format!(
                "Locker spot {} is already reserved",
                locker.spot
            )))
        });
    let ctx = TestContext::with_reservation_store(store);

    let response = reserve_locker(&ctx, "2504225", "c1").await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: Value = ctx.server.get("/health").await.json();
    assert_eq!(health, json!({ "status": "ok" }));

    let version: Value = ctx.server.get("/version").await.json();
    assert!(version["version"].is_string());
}
