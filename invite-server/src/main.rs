use clap::Parser;
use dotenv::dotenv;
use tracing::info;

use invite_server::config::{Args, ServerConfig};
use invite_server::{init_tracing, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let config = ServerConfig::from_args(args)?;
    info!("Invite server starting. addr={}", config.bind_addr);

    run(config).await?;
    info!("Main finished. Goodbye!");
    Ok(())
}
