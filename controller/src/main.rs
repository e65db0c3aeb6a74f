//! Aman-Q Controller
//!
//! Central coordination service for Aman-Q edge agents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    AMAN-Q CONTROLLER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Command  │  │  Node     │  │  Event Ring (30)        │ │
//! │  │  Channel  │  │  State    │  │                         │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        └──────────────┼──────────────────────┘              │
//! │                       ▼                                     │
//! │                ┌─────────────┐                             │
//! │                │ Vault (.enc)│                             │
//! │                └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod controller;
mod error;
mod handlers;
mod models;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use controller::Controller;
pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "amanq_controller=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Aman-Q Controller starting ({})...", config.environment);
    if !config.is_production() {
        tracing::warn!("CORS is open to any origin outside production");
    }
    tracing::info!("Vault: {}", config.vault_dir.display());

    let controller = Controller::new(&config.vault_dir)?;

    let state = AppState {
        controller: Arc::new(controller),
        config: config.clone(),
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Controller listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Controller stopped");
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
    pub config: config::Config,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    // Agent routes
    let agent_routes = Router::new()
        .route("/get_command", get(handlers::agent::get_command))
        .route("/metrics", post(handlers::agent::report_metrics))
        .route("/log_event", post(handlers::agent::log_event))
        .route("/upload_backup", post(handlers::agent::upload_backup))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    // Dashboard routes
    let dashboard_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/state", get(handlers::dashboard::get_state))
        .route("/trigger_attack", post(handlers::dashboard::trigger_attack))
        .route("/reset_system", post(handlers::dashboard::reset_system))
        .route("/vault_files", get(handlers::vault::list_files))
        .route("/inspect_file/:name", get(handlers::vault::inspect_file));

    Router::new()
        .merge(agent_routes)
        .merge(dashboard_routes)
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
