use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use taskboard_api::config::ServerConfig;
use taskboard_api::router::build_app_router;
use taskboard_api::state::AppState;
use taskboard_api::telemetry::init_tracing;
use taskboard_db::DbPool;
use taskboard_events::{ActivityRecorder, EventBus};

/// How long the activity recorder may take to drain after shutdown.
const RECORDER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        demo_mode = config.is_demo_mode(),
        "Loaded server configuration"
    );

    let pool = open_store(&config).await;

    let event_bus = Arc::new(EventBus::default());
    let recorder = tokio::spawn(ActivityRecorder::run(pool.clone(), event_bus.subscribe()));

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let app = build_app_router(AppState::new(pool, config, Arc::clone(&event_bus)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // Last bus handle: dropping it closes the channel and lets the
    // recorder finish what is queued.
    drop(event_bus);
    if tokio::time::timeout(RECORDER_DRAIN_TIMEOUT, recorder).await.is_err() {
        tracing::warn!("Activity recorder did not drain before timeout");
    }
    tracing::info!("Shutdown complete");
}

/// Open the configured store, or the in-memory one in demo mode, and
/// bring its schema up to date.
async fn open_store(config: &ServerConfig) -> DbPool {
    if config.is_demo_mode() {
        tracing::warn!("DATABASE_URL not set; data lives in memory and is lost on exit");
    }

    let pool = taskboard_db::create_pool(
        config.effective_database_url(),
        config.database_max_connections,
    )
    .await
    .expect("Failed to open database");

    taskboard_db::health_check(&pool)
        .await
        .expect("Database did not answer health check");
    taskboard_db::run_migrations(&pool)
        .await
        .expect("Failed to apply migrations");
    tracing::info!("Database ready");

    pool
}

/// Resolve on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl-C");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to listen for SIGTERM")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Ctrl-C received, shutting down"),
        () = terminate => tracing::info!("SIGTERM received, shutting down"),
    }
}
