//! HTTP front end of the invite code service.
//!
//! Routes live under `/api/invite`; see [`api::router`]. State is built once in
//! [`context::AppContext::connect`] and passed to every handler through the router.

pub mod api;
pub mod config;
pub mod context;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use invite_common::Error;
use crate::config::ServerConfig;
use crate::context::AppContext;

pub fn init_tracing() {
    let filter = EnvFilter::from_default_env()
        .add_directive("invite=info".parse().unwrap_or_default());
    let sub = fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(sub) {
        eprintln!("Failed to set global subscriber: {e}");
    }
}

pub async fn run(config: ServerConfig) -> Result<(), Error> {
    info!("Initializing state...");
    let ctx = AppContext::connect(&config).await?;

    let app = api::router(ctx);

    info!("Binding to {}", config.bind_addr);
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "Invite server running on {} (rate limit {}/{:?})",
        config.bind_addr, config.rate_limit.max_requests, config.rate_limit.window
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
