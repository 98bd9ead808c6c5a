//! Append-only audit rows for activities, parking and lockers.

use crate::models::{DbActivityStatus, DbReservationStatus};
use campus_core::models::activity::ActivityState;
use chrono::Utc;
use eyre::Result;
use sqlx::{Executor, PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_activity_status<'e, E>(
    executor: E,
    activity_id: Uuid,
    actor: Option<Uuid>,
    state: ActivityState,
    notify: &str,
) -> Result<DbActivityStatus>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, DbActivityStatus>(
        r#"
        INSERT INTO activity_statuses (id, activity_id, actor_account_id, status, is_granted, notify, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, activity_id, actor_account_id, status, is_granted, notify, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(activity_id)
    .bind(actor)
    .bind(state.as_str())
    .bind(state.is_granted())
    .bind(notify)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_activity_statuses(
    pool: &Pool<Postgres>,
    activity_id: Uuid,
) -> Result<Vec<DbActivityStatus>> {
    let rows = sqlx::query_as::<_, DbActivityStatus>(
        r#"
        SELECT id, activity_id, actor_account_id, status, is_granted, notify, created_at
        FROM activity_statuses
        WHERE activity_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(activity_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create_parking_status(
    conn: &mut PgConnection,
    parking_id: Uuid,
    actor: Option<Uuid>,
    is_available: bool,
    notify: &str,
) -> Result<DbReservationStatus> {
    let row = sqlx::query_as::<_, DbReservationStatus>(
        r#"
        INSERT INTO parking_statuses (id, parking_id, actor_account_id, is_available, notify, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, parking_id AS target_id, actor_account_id, is_available, notify, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(parking_id)
    .bind(actor)
    .bind(is_available)
    .bind(notify)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn create_locker_status(
    conn: &mut PgConnection,
    locker_id: Uuid,
    actor: Option<Uuid>,
    is_available: bool,
    notify: &str,
) -> Result<DbReservationStatus> {
    let row = sqlx::query_as::<_, DbReservationStatus>(
        r#"
        INSERT INTO locker_statuses (id, locker_id, actor_account_id, is_available, notify, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, locker_id AS target_id, actor_account_id, is_available, notify, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(locker_id)
    .bind(actor)
    .bind(is_available)
    .bind(notify)
    .bind(Utc::now())
    .fetch_one(conn)
    .await?;

    Ok(row)
}

pub async fn get_parking_statuses_by_student(
    pool: &Pool<Postgres>,
    student_id: &str,
) -> Result<Vec<DbReservationStatus>> {
    let rows = sqlx::query_as::<_, DbReservationStatus>(
        r#"
        SELECT ps.id, ps.parking_id AS target_id, ps.actor_account_id, ps.is_available, ps.notify, ps.created_at
        FROM parking_statuses ps
        JOIN parkings p ON p.id = ps.parking_id
        WHERE p.student_id = $1
        ORDER BY ps.created_at ASC
        "#,
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_locker_statuses_by_spot(
    pool: &Pool<Postgres>,
    spot: &str,
) -> Result<Vec<DbReservationStatus>> {
    let rows = sqlx::query_as::<_, DbReservationStatus>(
        r#"
        SELECT ls.id, ls.locker_id AS target_id, ls.actor_account_id, ls.is_available, ls.notify, ls.created_at
        FROM locker_statuses ls
        JOIN lockers l ON l.id = ls.locker_id
        WHERE l.spot = $1
        ORDER BY ls.created_at ASC
        "#,
    )
    .bind(spot)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
