use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use b2better_recs::{
    config::Config,
    db::{self, CatalogStore, PgCatalogStore},
    routes,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config before logging so a bad environment fails loudly
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("b2better_recs=info,tower_http=info")),
        )
        .init();

    let pool = db::create_pool(&config.database_url).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let catalog: Arc<dyn CatalogStore> = Arc::new(PgCatalogStore::new(pool));
    let app = routes::create_router(catalog);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "recommendation service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("failed to install ctrl-c handler");
    }
}
