use std::net::SocketAddr;
use std::time::Duration;
use clap::Parser;

use invite_common::Error;
use invite_core::CodeGenerator;
use invite_core::db::DEFAULT_MAX_CONNECTIONS;
use crate::api::rate_limit::RateLimitConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "invite-server")]
#[command(author, version, about = "Invite code service: generate, check and activate invitation codes")]
pub struct Args {
    /// Address to which the server will bind
    #[arg(long, env = "INVITE_SERVER_ADDR", default_value = "0.0.0.0:8000")]
    pub server_addr: String,

    /// Postgres connection URL.
    #[arg(long, env = "DATABASE_URL", default_value = "postgres://invite@localhost:5432/invite")]
    pub database_url: String,

    #[arg(long, env = "INVITE_DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub db_max_connections: u32,

    /// Requests allowed per client in each rate-limit window
    #[arg(long, env = "INVITE_RATE_LIMIT", default_value_t = 100)]
    pub rate_limit: u32,

    #[arg(long, env = "INVITE_RATE_WINDOW_SECS", default_value_t = 60)]
    pub rate_window_secs: u64,

    /// Count clients by the first `X-Forwarded-For` entry. Only safe behind a proxy that sets it
    #[arg(long, env = "INVITE_TRUST_FORWARDED_FOR", default_value_t = false)]
    pub trust_forwarded_for: bool,

    /// Upper bound on `code_number` for a single generate call
    #[arg(long, env = "INVITE_MAX_CODES", default_value_t = 1000)]
    pub max_codes_per_request: usize,

    #[arg(long, env = "INVITE_CODE_LENGTH", default_value_t = 8)]
    pub code_length: usize,

    /// Do not apply migrations on startup
    #[arg(long, env = "INVITE_SKIP_MIGRATIONS", default_value_t = false)]
    pub skip_migrations: bool,
}

/// Validated server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub db_max_connections: u32,
    pub rate_limit: RateLimitConfig,
    pub max_codes_per_request: usize,
    pub code_length: usize,
    pub run_migrations: bool,
}

impl ServerConfig {
    pub fn from_args(args: Args) -> Result<Self, Error> {
        let bind_addr: SocketAddr = args.server_addr.parse()?;

        if args.db_max_connections == 0 {
            return Err(Error::Config("db_max_connections must be positive".into()));
        }
        if args.rate_limit == 0 {
            return Err(Error::Config("rate_limit must be positive".into()));
        }
        if args.rate_window_secs == 0 {
            return Err(Error::Config("rate_window_secs must be positive".into()));
        }
        if args.max_codes_per_request == 0 {
            return Err(Error::Config("max_codes_per_request must be positive".into()));
        }

        let generator = CodeGenerator::new(args.code_length)?;
        if args.max_codes_per_request > generator.capacity() {
            return Err(Error::Config(format!(
                "max_codes_per_request {} exceeds the {} distinct codes of length {}",
                args.max_codes_per_request,
                generator.capacity(),
                args.code_length
            )));
        }

        Ok(Self {
            bind_addr,
            database_url: args.database_url,
            db_max_connections: args.db_max_connections,
            rate_limit: RateLimitConfig {
                max_requests: args.rate_limit,
                window: Duration::from_secs(args.rate_window_secs),
                trust_forwarded_for: args.trust_forwarded_for,
            },
            max_codes_per_request: args.max_codes_per_request,
            code_length: args.code_length,
            run_migrations: !args.skip_migrations,
        })
    }
}
