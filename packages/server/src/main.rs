use std::net::SocketAddr;

use tokio_util::sync::CancellationToken;
use tracing::{Level, info};

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = server::database::init_db(&config.database.url).await?;
    server::seed::ensure_indexes(&db).await?;

    let shutdown = CancellationToken::new();
    let sweeper = tokio::spawn(server::sweeper::run_expiry_sweeper(
        db.clone(),
        config.sweeper.clone(),
        shutdown.clone(),
    ));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState { db, config };
    let app = server::build_router(state);

    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received");
                shutdown.cancel();
            }
        })
        .await?;

    shutdown.cancel();
    sweeper.await?;

    Ok(())
}
