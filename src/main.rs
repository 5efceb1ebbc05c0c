use std::sync::Arc;

use anyhow::Context;

use reel_reads::{
    catalog::Catalog,
    config::Config,
    console::Console,
    db::SessionStore,
    services::providers::GoodreadsProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.catalog_path).context("Failed to load book catalog")?;

    let store = SessionStore::open(&config.database_path)
        .await
        .context("Failed to open session database")?;

    let provider = Arc::new(
        GoodreadsProvider::new(config.search_url.clone(), config.request_timeout_secs)
            .context("Failed to build external lookup client")?,
    );

    let mut console = Console::new(catalog, store, provider, config);
    console.run().await?;

    Ok(())
}
