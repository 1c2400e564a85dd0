use archery_log::{AppState, Config, JsonFileStore, PracticeLog, router};
use chrono::{Local, Utc};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let store = JsonFileStore::open(config.data_path.clone()).await;
    info!("using data file {}", store.path().display());

    let log = PracticeLog::new(Arc::new(store));
    if config.seed_defaults {
        log.initialize_defaults(Local::now().date_naive(), Utc::now().timestamp_millis())
            .await?;
    }

    let app = router(AppState::new(log));
    let addr = config.addr();

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
