// File: invite-core/src/test_utils/helpers.rs

use sqlx::{Pool, Postgres};
use sqlx::postgres::PgPoolOptions;
use tracing::warn;
use crate::Error;
use crate::db::Database;

/// Create a connection pool to the test DB named by `TEST_DATABASE_URL`.
/// Returns `None` when the variable is unset so Postgres-backed tests can skip.
pub async fn create_test_db_pool() -> Result<Option<Pool<Postgres>>, Error> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        warn!("TEST_DATABASE_URL not set; skipping Postgres-backed test");
        return Ok(None);
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await?;

    Ok(Some(pool))
}

/// Wipes out test data so each test can start fresh.
pub async fn clean_database(pool: &Pool<Postgres>) -> Result<(), Error> {
    sqlx::query(r#"
        TRUNCATE TABLE
            invite_codes,
            user_addresses
        RESTART IDENTITY CASCADE;
    "#)
        .execute(pool)
        .await?;

    Ok(())
}

/// A migrated, emptied database, or `None` when no test database is configured.
pub async fn setup_test_database() -> Result<Option<Database>, Error> {
    let Some(pool) = create_test_db_pool().await? else {
        return Ok(None);
    };
    let db = Database::from_pool(pool);
    db.migrate().await?;
    clean_database(db.pool()).await?;
    Ok(Some(db))
}
