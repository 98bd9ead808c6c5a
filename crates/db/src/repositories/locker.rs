use crate::models::{DbLocker, DbLockerListing};
use campus_core::models::reservation::NewLocker;
use chrono::Utc;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_locker(conn: &mut PgConnection, locker: &NewLocker) -> Result<DbLocker> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbLocker>(
        r#"
        INSERT INTO lockers (id, student_id, spot, is_available, created_at)
        VALUES ($1, $2, $3, FALSE, $4)
        RETURNING id, student_id, spot, is_available, created_at, released_at
        "#,
    )
    .bind(id)
    .bind(&locker.student_id)
    .bind(&locker.spot)
    .bind(now)
    .fetch_one(conn)
    .await?;

    Ok(row)
}

/// Locks the active row for `spot`, if any, so a concurrent release of the
/// same spot waits for this transaction.
pub async fn lock_active_locker_by_spot(
    conn: &mut PgConnection,
    spot: &str,
) -> Result<Option<DbLocker>> {
    let row = sqlx::query_as::<_, DbLocker>(
        r#"
        SELECT id, student_id, spot, is_available, created_at, released_at
        FROM lockers
        WHERE spot = $1 AND NOT is_available
        FOR UPDATE
        "#,
    )
    .bind(spot)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

pub async fn mark_locker_available(conn: &mut PgConnection, id: Uuid) -> Result<DbLocker> {
    let row = sqlx::query_as::<_, DbLocker>(
        r#"
        UPDATE lockers
        SET is_available = TRUE, released_at = $2
        WHERE id = $1
        RETURNING id, student_id, spot, is_available, created_at, released_at
        "#,
    )
    .bind(id)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn get_lockers(pool: &Pool<Postgres>) -> Result<Vec<DbLockerListing>> {
    let rows = sqlx::query_as::<_, DbLockerListing>(
        r#"
        SELECT l.id, l.student_id, l.spot, l.is_available, l.created_at, l.released_at,
               s.first_name AS stud_first_name, s.last_name AS stud_last_name, s.course AS stud_course
        FROM lockers l
        LEFT JOIN students s ON s.student_id = l.student_id
        ORDER BY l.created_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
