use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create accounts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id UUID PRIMARY KEY,
            user_id VARCHAR(50) NOT NULL UNIQUE,
            password VARCHAR(255) NOT NULL,
            role VARCHAR(20) NOT NULL CHECK (role IN ('student', 'admin')),
            display_name VARCHAR(50) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create students table, one per student account
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS students (
            student_id VARCHAR(20) PRIMARY KEY,
            account_id UUID NOT NULL UNIQUE REFERENCES accounts(id) ON DELETE CASCADE,
            first_name VARCHAR(25) NOT NULL,
            middle_initial VARCHAR(1) NULL,
            last_name VARCHAR(25) NOT NULL,
            year_level INTEGER NOT NULL CHECK (year_level > 0),
            course VARCHAR(10) NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create organizers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS organizers (
            id UUID PRIMARY KEY,
            first_name VARCHAR(25) NOT NULL,
            middle_initial VARCHAR(1) NULL,
            last_name VARCHAR(25) NOT NULL,
            organization VARCHAR(50) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create activities table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activities (
            id UUID PRIMARY KEY,
            student_id VARCHAR(20) NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
            organizer_id UUID NOT NULL REFERENCES organizers(id) ON DELETE CASCADE,
            name VARCHAR(50) NOT NULL,
            description VARCHAR(200) NOT NULL,
            status VARCHAR(10) NOT NULL CHECK (status IN ('Pending', 'Approved', 'Declined')),
            is_granted BOOLEAN NOT NULL DEFAULT FALSE,
            scheduled_at TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create parkings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parkings (
            id UUID PRIMARY KEY,
            student_id VARCHAR(20) NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
            spot VARCHAR(8) NOT NULL,
            vehicle_type VARCHAR(30) NOT NULL,
            vehicle_model VARCHAR(30) NOT NULL,
            schedule VARCHAR(2) NOT NULL CHECK (schedule IN ('AM', 'PM')),
            reservation_date TIMESTAMP WITH TIME ZONE NULL,
            expiry_date TIMESTAMP WITH TIME ZONE NULL,
            is_available BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            released_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create lockers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lockers (
            id UUID PRIMARY KEY,
            student_id VARCHAR(20) NOT NULL REFERENCES students(student_id) ON DELETE CASCADE,
            spot VARCHAR(8) NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            released_at TIMESTAMP WITH TIME ZONE NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create audit tables
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS activity_statuses (
            id UUID PRIMARY KEY,
            activity_id UUID NOT NULL REFERENCES activities(id) ON DELETE CASCADE,
            actor_account_id UUID NULL REFERENCES accounts(id) ON DELETE SET NULL,
            status VARCHAR(10) NOT NULL,
            is_granted BOOLEAN NOT NULL,
            notify VARCHAR(100) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS parking_statuses (
            id UUID PRIMARY KEY,
            parking_id UUID NOT NULL REFERENCES parkings(id) ON DELETE CASCADE,
            actor_account_id UUID NULL REFERENCES accounts(id) ON DELETE SET NULL,
            is_available BOOLEAN NOT NULL,
            notify VARCHAR(100) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locker_statuses (
            id UUID PRIMARY KEY,
            locker_id UUID NOT NULL REFERENCES lockers(id) ON DELETE CASCADE,
            actor_account_id UUID NULL REFERENCES accounts(id) ON DELETE SET NULL,
            is_available BOOLEAN NOT NULL,
            notify VARCHAR(100) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // At most one reserved row per spot, and per student for parking.
    // Released rows stay behind as history and are ignored by these indexes.
    let indexes = [
        "CREATE UNIQUE INDEX IF NOT EXISTS parkings_active_spot_idx ON parkings(spot) WHERE NOT is_available",
        "CREATE UNIQUE INDEX IF NOT EXISTS parkings_active_student_idx ON parkings(student_id) WHERE NOT is_available",
        "CREATE UNIQUE INDEX IF NOT EXISTS lockers_active_spot_idx ON lockers(spot) WHERE NOT is_available",
        "CREATE INDEX IF NOT EXISTS idx_activities_student_id ON activities(student_id)",
        "CREATE INDEX IF NOT EXISTS idx_activities_organizer_id ON activities(organizer_id)",
        "CREATE INDEX IF NOT EXISTS idx_lockers_student_id ON lockers(student_id)",
        "CREATE INDEX IF NOT EXISTS idx_activity_statuses_activity_id ON activity_statuses(activity_id)",
        "CREATE INDEX IF NOT EXISTS idx_parking_statuses_parking_id ON parking_statuses(parking_id)",
        "CREATE INDEX IF NOT EXISTS idx_locker_statuses_locker_id ON locker_statuses(locker_id)",
    ];
    for statement in indexes {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
