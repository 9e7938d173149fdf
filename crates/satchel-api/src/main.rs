//! Satchel API server entry point.

use satchel_api::config::Config;
use satchel_api::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,satchel=debug".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(addr = %config.bind_addr, db = %config.db_path.display(), "starting satchel-api");

    server::run(config).await?;
    Ok(())
}
