pub mod memory;
pub mod repositories;

pub use memory::MemoryStore;

/// Connects to `TEST_DATABASE_URL` and initialises the schema. Returns
/// `None` when the variable is unset so Postgres-backed tests can skip.
pub async fn create_test_pool() -> eyre::Result<Option<crate::DbPool>> {
    let Ok(database_url) = std::env::var("TEST_DATABASE_URL") else {
        return Ok(None);
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(4)
        .connect(&database_url)
        .await?;

    // Initialize test schema
    crate::schema::initialize_database(&pool).await?;

    Ok(Some(pool))
}
