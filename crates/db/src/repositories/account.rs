use crate::models::DbAccount;
use campus_core::models::account::{NewAccount, Role};
use chrono::Utc;
use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use uuid::Uuid;

pub async fn create_account<'e, E>(executor: E, account: &NewAccount) -> Result<DbAccount>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating account: id={}, user_id={}, role={}",
        id, account.user_id, account.role
    );

    let row = sqlx::query_as::<_, DbAccount>(
        r#"
        INSERT INTO accounts (id, user_id, password, role, display_name, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, user_id, password, role, display_name, created_at
        "#,
    )
    .bind(id)
    .bind(&account.user_id)
    .bind(&account.password)
    .bind(account.role.as_str())
    .bind(&account.display_name)
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_account_by_user_id(
    pool: &Pool<Postgres>,
    user_id: &str,
) -> Result<Option<DbAccount>> {
    let row = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, user_id, password, role, display_name, created_at
        FROM accounts
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_account_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAccount>> {
    let row = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, user_id, password, role, display_name, created_at
        FROM accounts
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_accounts_by_role(pool: &Pool<Postgres>, role: Role) -> Result<Vec<DbAccount>> {
    let rows = sqlx::query_as::<_, DbAccount>(
        r#"
        SELECT id, user_id, password, role, display_name, created_at
        FROM accounts
        WHERE role = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(role.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Foreign keys cascade the delete to the student profile and everything
/// it owns.
pub async fn delete_account(pool: &Pool<Postgres>, id: Uuid, role: Role) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM accounts
        WHERE id = $1 AND role = $2
        "#,
    )
    .bind(id)
    .bind(role.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
