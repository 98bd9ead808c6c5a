use std::sync::Arc;

use campus_api::{ApiState, config::ApiConfig};
use campus_db::{PgStore, create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Create database connection pool
    let db_pool = create_pool(&config.database_url, config.database_max_connections).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    let state = Arc::new(ApiState::from_store(Arc::new(PgStore::new(db_pool))));
    campus_api::start_server(config, state).await?;

    Ok(())
}
