// invite-core/src/db/mod.rs

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use tracing::info;
use crate::Error;

/// Pool size used when `INVITE_DB_MAX_CONNECTIONS` is not set.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Postgres handle for the address registry and the invite code pool.
///
/// Built once at startup and cloned into the repositories; the pool inside is
/// reference counted, so clones share connections.
#[derive(Clone)]
pub struct Database {
    pool: Pool<Postgres>,
}

impl Database {
    /// Open a pool of at most `max_connections` connections to `database_url`.
    pub async fn with_max_connections(database_url: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to Postgres (max_connections={})", max_connections);
        Ok(Self { pool })
    }

    /// Create or upgrade the `user_addresses` and `invite_codes` tables.
    pub async fn migrate(&self) -> Result<(), Error> {
        info!("Applying invite schema migrations...");
        sqlx::migrate!("../migrations").run(&self.pool).await?;
        info!("Invite schema is up to date.");
        Ok(())
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    /// Wrap an existing pool, e.g. one opened by the integration test helpers.
    pub fn from_pool(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}
