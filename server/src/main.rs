use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod router;

use config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    if !config.dist_dir.join("index.html").exists() {
        tracing::warn!(
            "No index.html in {}; run `trunk build` in frontend/ first",
            config.dist_dir.display()
        );
    }

    let app = router::build_router(&config.dist_dir, config.allowed_origin.clone());

    info!("Serving {} on {}", config.dist_dir.display(), config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
