use crate::models::{DbActivity, DbActivityListing};
use campus_core::models::activity::{ActivityState, NewActivity};
use chrono::Utc;
use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_activity<'e, E>(executor: E, activity: &NewActivity) -> Result<DbActivity>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbActivity>(
        r#"
        INSERT INTO activities (id, student_id, organizer_id, name, description, status, is_granted, scheduled_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7, $8)
        RETURNING id, student_id, organizer_id, name, description, status, is_granted, scheduled_at, created_at
        "#,
    )
    .bind(id)
    .bind(&activity.student_id)
    .bind(activity.organizer_id)
    .bind(&activity.name)
    .bind(&activity.description)
    .bind(ActivityState::Pending.as_str())
    .bind(activity.scheduled_at)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_activity_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbActivity>> {
    let row = sqlx::query_as::<_, DbActivity>(
        r#"
        SELECT id, student_id, organizer_id, name, description, status, is_granted, scheduled_at, created_at
        FROM activities
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_activities(pool: &Pool<Postgres>) -> Result<Vec<DbActivityListing>> {
    let rows = sqlx::query_as::<_, DbActivityListing>(
        r#"
        SELECT a.id, a.student_id, a.organizer_id, a.name, a.description, a.status,
               a.is_granted, a.scheduled_at, a.created_at,
               s.first_name AS stud_first_name, s.last_name AS stud_last_name, s.course AS stud_course,
               o.organization AS org_organization, o.first_name AS org_first_name, o.last_name AS org_last_name
        FROM activities a
        LEFT JOIN students s ON s.student_id = a.student_id
        LEFT JOIN organizers o ON o.id = a.organizer_id
        ORDER BY a.scheduled_at ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_activity_state<'e, E>(
    executor: E,
    id: Uuid,
    state: ActivityState,
) -> Result<Option<DbActivity>>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, DbActivity>(
        r#"
        UPDATE activities
        SET status = $2, is_granted = $3
        WHERE id = $1
        RETURNING id, student_id, organizer_id, name, description, status, is_granted, scheduled_at, created_at
        "#,
    )
    .bind(id)
    .bind(state.as_str())
    .bind(state.is_granted())
    .fetch_optional(executor)
    .await?;

    Ok(row)
}
