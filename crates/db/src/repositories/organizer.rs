use crate::models::DbOrganizer;
use campus_core::models::organizer::NewOrganizer;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_organizer(pool: &Pool<Postgres>, organizer: &NewOrganizer) -> Result<DbOrganizer> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, DbOrganizer>(
        r#"
        INSERT INTO organizers (id, first_name, middle_initial, last_name, organization, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, first_name, middle_initial, last_name, organization, created_at
        "#,
    )
    .bind(id)
    .bind(&organizer.first_name)
    .bind(&organizer.middle_initial)
    .bind(&organizer.last_name)
    .bind(&organizer.organization)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_organizers(pool: &Pool<Postgres>) -> Result<Vec<DbOrganizer>> {
    let rows = sqlx::query_as::<_, DbOrganizer>(
        r#"
        SELECT id, first_name, middle_initial, last_name, organization, created_at
        FROM organizers
        ORDER BY organization ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_organizer_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbOrganizer>> {
    let row = sqlx::query_as::<_, DbOrganizer>(
        r#"
        SELECT id, first_name, middle_initial, last_name, organization, created_at
        FROM organizers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_organizer(
    pool: &Pool<Postgres>,
    id: Uuid,
    organizer: &NewOrganizer,
) -> Result<Option<DbOrganizer>> {
    let row = sqlx::query_as::<_, DbOrganizer>(
        r#"
        UPDATE organizers
        SET first_name = $2, middle_initial = $3, last_name = $4, organization = $5
        WHERE id = $1
        RETURNING id, first_name, middle_initial, last_name, organization, created_at
        "#,
    )
    .bind(id)
    .bind(&organizer.first_name)
    .bind(&organizer.middle_initial)
    .bind(&organizer.last_name)
    .bind(&organizer.organization)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_organizer(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM organizers
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
