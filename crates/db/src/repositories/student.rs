use crate::models::{DbStudent, DbStudentListing};
use campus_core::models::student::NewStudent;
use eyre::Result;
use sqlx::{Executor, PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_student<'e, E>(
    executor: E,
    account_id: Uuid,
    student: &NewStudent,
) -> Result<DbStudent>
where
    E: Executor<'e, Database = Postgres>,
{
    let row = sqlx::query_as::<_, DbStudent>(
        r#"
        INSERT INTO students (student_id, account_id, first_name, middle_initial, last_name, year_level, course)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING student_id, account_id, first_name, middle_initial, last_name, year_level, course
        "#,
    )
    .bind(&student.student_id)
    .bind(account_id)
    .bind(&student.first_name)
    .bind(&student.middle_initial)
    .bind(&student.last_name)
    .bind(student.year_level)
    .bind(&student.course)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

pub async fn get_student_by_id(
    pool: &Pool<Postgres>,
    student_id: &str,
) -> Result<Option<DbStudent>> {
    let row = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT student_id, account_id, first_name, middle_initial, last_name, year_level, course
        FROM students
        WHERE student_id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn get_student_by_account(
    pool: &Pool<Postgres>,
    account_id: Uuid,
) -> Result<Option<DbStudent>> {
    let row = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT student_id, account_id, first_name, middle_initial, last_name, year_level, course
        FROM students
        WHERE account_id = $1
        "#,
    )
    .bind(account_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Locks the student row for the rest of the transaction. Every
/// reservation write takes this lock first, so writes for one student run
/// one at a time.
pub async fn lock_student(conn: &mut PgConnection, student_id: &str) -> Result<Option<DbStudent>> {
    let row = sqlx::query_as::<_, DbStudent>(
        r#"
        SELECT student_id, account_id, first_name, middle_initial, last_name, year_level, course
        FROM students
        WHERE student_id = $1
        FOR UPDATE
        "#,
    )
    .bind(student_id)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

pub async fn get_students(pool: &Pool<Postgres>) -> Result<Vec<DbStudentListing>> {
    let rows = sqlx::query_as::<_, DbStudentListing>(
        r#"
        SELECT s.student_id, s.first_name, s.middle_initial, s.last_name, s.year_level, s.course, a.user_id
        FROM students s
        JOIN accounts a ON a.id = s.account_id
        ORDER BY s.last_name ASC, s.first_name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
