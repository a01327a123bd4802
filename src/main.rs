//! Pomodoro Widget - A single-page work/break countdown timer
//!
//! This is the main entry point for the pomodoro-widget application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_widget::{
    api::create_router,
    config::Config,
    engine::TimerEngine,
    state::AppState,
    tasks::console_view_task,
    utils::shutdown_signal,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_widget={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-widget v{}", env!("CARGO_PKG_VERSION"));

    let timer_config = config.timer_config();
    info!(
        "Configuration: host={}, port={}, work={}s, break={}s",
        config.host, config.port, timer_config.work_duration_seconds, timer_config.break_duration_seconds
    );

    let notifier = config.notifier().map_err(anyhow::Error::msg)?;
    let engine = TimerEngine::new(timer_config, notifier);

    if config.console {
        tokio::spawn(console_view_task(engine.subscribe()));
    }

    // Create application state and the HTTP router
    let state = Arc::new(AppState::new(engine.clone(), config.port, config.host.clone()));
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Widget running on http://{}", addr);

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

    engine.shutdown();
    info!("Shutdown complete");
    Ok(())
}
