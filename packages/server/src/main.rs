use anyhow::Context;
use ladle_server::config::AppConfig;
use ladle_server::database::init_db;
use ladle_server::seed::{bootstrap_admin, ensure_indexes};
use ladle_server::state::AppState;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    info!("Connecting to database...");
    let db = init_db(&config.database.url)
        .await
        .context("failed to initialize database")?;
    ensure_indexes(&db).await?;
    if let Some(ref admin) = config.admin {
        bootstrap_admin(&db, admin).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = ladle_server::build_router(AppState { db, config });

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
