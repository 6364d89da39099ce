//! Exam Clock - exam information display with a persistent countdown timer
//!
//! This is the main entry point for the exam-clock application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use exam_clock::{
    config::Config,
    state::{format_hms, AppState},
    api::create_router,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("exam_clock={},tower_http=info", config.log_level()))
        .init();

    info!("Starting exam-clock server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, default duration={}min, state={}",
          config.host, config.port, config.duration,
          if config.ephemeral { "memory".to_string() } else { config.state_file.display().to_string() });

    // Load persisted state
    let store = config.open_store();
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        store,
        config.duration,
        config.resume(),
    ));

    let timer = state.get_timer_state().map_err(anyhow::Error::msg)?;
    info!("Timer at {} ({:?})", format_hms(timer.remaining_seconds), timer.phase());

    // Start the countdown background task
    let countdown = tokio::spawn(countdown_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timer            - Countdown state");
    info!("  POST /timer/start      - Start the countdown");
    info!("  POST /timer/stop       - Pause the countdown");
    info!("  POST /timer/reset      - Restore the configured duration");
    info!("  POST /timer/adjust     - Shift remaining time (stopped only)");
    info!("  POST /timer/remaining  - Set remaining time (stopped only)");
    info!("  GET/PUT /exam          - Exam details");
    info!("  GET  /presets          - Exam presets");
    info!("  GET/PUT /settings      - Display settings");
    info!("  GET  /status           - Overall status");
    info!("  GET  /health           - Health check");

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

    // No tick may fire after shutdown
    countdown.abort();

    info!("Server shutdown complete");
    Ok(())
}
