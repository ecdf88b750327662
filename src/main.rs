//! Pomodoro Server - A state-managed HTTP server driving a Pomodoro timer
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    api::create_router,
    config::Config,
    state::AppState,
    store::FileStore,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, store={}, long_break_interval={}, auto_start={}",
          config.host, config.port, config.store.display(),
          config.long_break_interval, config.auto_start);

    // Create application state, hydrated from the store
    let store = FileStore::new(config.store.clone());
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        Box::new(store),
        config.controller_options(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/:mode/start - Start a countdown");
    info!("  POST /timer/:mode/pause - Pause a countdown");
    info!("  POST /timer/:mode/reset - Reset a countdown");
    info!("  POST /timer/:mode/press - Timer button (start/pause/restart)");
    info!("  POST /mode/:mode        - Switch mode");
    info!("  GET  /settings          - Current settings");
    info!("  PUT  /settings          - Apply settings");
    info!("  GET  /stats             - Session statistics");
    info!("  GET  /status            - Full timer snapshot");
    info!("  GET  /events            - Snapshot stream (SSE)");
    info!("  GET  /health            - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.persist() {
        tracing::error!("Failed to persist state on shutdown: {}", e);
    }

    info!("Server shutdown complete");
    Ok(())
}
