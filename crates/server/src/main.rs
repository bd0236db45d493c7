//! Troophq server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, Router};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use troophq_api::{auth_middleware, middleware::AppState, router as api_router};
use troophq_common::{Config, TokenManager};
use troophq_core::{AuthService, ProfileService, ReportService, StatsService, StrikeService};
use troophq_db::repositories::{ReportRepository, StrikeRepository, UserRepository};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "troophq=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting troophq server...");

    // Load configuration
    let config = Config::load()?;

    // Connect to database
    let db = troophq_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    troophq_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let report_repo = ReportRepository::new(Arc::clone(&db));
    let strike_repo = StrikeRepository::new(Arc::clone(&db));

    // Initialize services
    let tokens = TokenManager::new(&config.auth.jwt_secret, config.auth.token_ttl_days);
    let auth_service = AuthService::new(user_repo.clone(), tokens);
    let profile_service = ProfileService::new(user_repo.clone());
    let report_service = ReportService::new(report_repo.clone(), user_repo.clone());
    let strike_service = StrikeService::new(strike_repo.clone(), user_repo.clone());
    let stats_service = StatsService::new(user_repo, report_repo, strike_repo);

    // Create app state
    let state = AppState {
        auth_service,
        profile_service,
        report_service,
        strike_service,
        stats_service,
    };

    // Build router
    let app = Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Start server with graceful shutdown
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
