use std::sync::Arc;
use tracing::info;

use invite_common::Error;
use invite_core::repositories::{PostgresAddressRepository, PostgresInviteCodeRepository};
use invite_core::{CodeGenerator, Database, InviteService};

use crate::api::rate_limit::RateLimiter;
use crate::config::ServerConfig;

/// Everything a request handler needs, shared through the router state.
pub struct AppContext {
    pub service: InviteService,
    pub rate_limiter: RateLimiter,
}

impl AppContext {
    pub fn new(service: InviteService, rate_limiter: RateLimiter) -> Arc<Self> {
        Arc::new(Self { service, rate_limiter })
    }

    /// Connects to Postgres, applies migrations if configured, and wires the repositories.
    pub async fn connect(config: &ServerConfig) -> Result<Arc<Self>, Error> {
        let db = Database::with_max_connections(&config.database_url, config.db_max_connections).await?;
        if config.run_migrations {
            db.migrate().await?;
        } else {
            info!("Skipping migrations");
        }

        let addresses = Arc::new(PostgresAddressRepository::new(db.pool().clone()));
        let codes = Arc::new(PostgresInviteCodeRepository::new(db.pool().clone()));
        let generator = CodeGenerator::new(config.code_length)?;

        let service = InviteService::new(addresses, codes, generator)
            .with_max_codes_per_request(config.max_codes_per_request);

        Ok(Self::new(service, RateLimiter::new(config.rate_limit)))
    }
}
