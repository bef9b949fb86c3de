#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::sync::Arc;

    use campus_directory::{DirectoryConfig, DirectoryStore, http_api};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DirectoryConfig::from_env()?;
    let store = Arc::new(DirectoryStore::new());
    if config.has_sources() {
        let summary = store.reload(&config)?;
        tracing::info!(
            buildings = summary.buildings,
            schedules = summary.schedules,
            "initial data loaded"
        );
    } else {
        tracing::warn!("no data files configured; serving an empty directory");
    }

    http_api::serve(config, store).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
