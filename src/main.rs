use pushup_tracker::{load_snapshot, router, AppState, Config, FileStore, Tracker};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let store = FileStore::new(&config.data_dir);
    let snapshot = load_snapshot(&store).await;
    info!(
        entries = snapshot.entries.len(),
        goal = snapshot.yearly_goal,
        path = %store.path_for(pushup_tracker::storage::SNAPSHOT_KEY).display(),
        "loaded snapshot"
    );

    let state = AppState::new(Arc::new(store), Tracker::new(snapshot));
    let app = router(state);

    let addr = config.addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
