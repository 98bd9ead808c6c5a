use crate::models::{DbParking, DbParkingListing};
use campus_core::models::reservation::NewParking;
use chrono::Utc;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_parking(conn: &mut PgConnection, parking: &NewParking) -> Result<DbParking> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbParking>(
        r#"
        INSERT INTO parkings (id, student_id, spot, vehicle_type, vehicle_model, schedule,
                              reservation_date, expiry_date, is_available, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE, $9)
        RETURNING id, student_id, spot, vehicle_type, vehicle_model, schedule,
                  reservation_date, expiry_date, is_available, created_at, released_at
        "#,
    )
    .bind(id)
    .bind(&parking.student_id)
    .bind(&parking.spot)
    .bind(&parking.vehicle_type)
    .bind(&parking.vehicle_model)
    .bind(parking.schedule.as_str())
    .bind(parking.reservation_date)
    .bind(parking.expiry_date)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn get_active_parking_by_student(
    conn: &mut PgConnection,
    student_id: &str,
) -> Result<Option<DbParking>> {
    let row = sqlx::query_as::<_, DbParking>(
        r#"
        SELECT id, student_id, spot, vehicle_type, vehicle_model, schedule,
               reservation_date, expiry_date, is_available, created_at, released_at
        FROM parkings
        WHERE student_id = $1 AND NOT is_available
        "#,
    )
    .bind(student_id)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

pub async fn get_active_parking_by_spot(
    conn: &mut PgConnection,
    spot: &str,
) -> Result<Option<DbParking>> {
    let row = sqlx::query_as::<_, DbParking>(
        r#"
        SELECT id, student_id, spot, vehicle_type, vehicle_model, schedule,
               reservation_date, expiry_date, is_available, created_at, released_at
        FROM parkings
        WHERE spot = $1 AND NOT is_available
        "#,
    )
    .bind(spot)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

pub async fn is_spot_reserved(conn: &mut PgConnection, spot: &str) -> Result<bool> {
    let reserved: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (SELECT 1 FROM parkings WHERE spot = $1 AND NOT is_available)
        "#,
    )
    .bind(spot)
    .fetch_one(conn)
    .await?;

    Ok(reserved)
}

pub async fn mark_parking_available(conn: &mut PgConnection, id: Uuid) -> Result<DbParking> {
    let row = sqlx::query_as::<_, DbParking>(
        r#"
        UPDATE parkings
        SET is_available = TRUE, released_at = $2
        WHERE id = $1
        RETURNING id, student_id, spot, vehicle_type, vehicle_model, schedule,
                  reservation_date, expiry_date, is_available, created_at, released_at
        "#,
    )
    .bind(id)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn get_parkings(pool: &Pool<Postgres>) -> Result<Vec<DbParkingListing>> {
    let rows = sqlx::query_as::<_, DbParkingListing>(
        r#"
        SELECT p.id, p.student_id, p.spot, p.vehicle_type, p.vehicle_model, p.schedule,
               p.reservation_date, p.expiry_date, p.is_available, p.created_at, p.released_at,
               s.first_name AS stud_first_name, s.last_name AS stud_last_name, s.course AS stud_course
        FROM parkings p
        LEFT JOIN students s ON s.student_id = p.student_id
        ORDER BY p.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
