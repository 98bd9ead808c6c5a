use color_eyre::eyre::{Result, WrapErr};
use dotenv::dotenv;
use campus_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;

    tracing_subscriber::fmt().with_target(false).init();

    tracing::info!("Connecting to database...");
    let db_pool = campus_db::create_pool(&database_url, 1).await?;

    initialize_database(&db_pool).await?;

    Ok(())
}
