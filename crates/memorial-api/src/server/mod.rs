//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, Router};
use memorial_common::{AppConfig, AppError, JwtService};
use memorial_db::{create_pool, run_migrations, PgMemorialRepository, PgUserRepository};
use memorial_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::{apply_common_layers, apply_middleware_with_config};
use crate::routes::{create_router, health_routes, image_routes};
use crate::state::AppState;
use crate::storage::LocalImageStore;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes and static images skip the rate limiter.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let is_production = config.app.env.is_production();

    let api = create_router().layer(DefaultBodyLimit::max(config.storage.body_limit_bytes()));
    let api = apply_middleware_with_config(api, &config.rate_limit, &config.cors, is_production)?;

    let open = health_routes().merge(image_routes(Path::new(&config.storage.upload_dir)));
    let open = apply_common_layers(open, &config.cors, is_production);

    Ok(api.merge(open).with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    // Create database pool
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&memorial_db::DatabaseConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;
    info!("Database migrations applied");

    // Image storage
    let image_store = LocalImageStore::new(&config.storage.upload_dir);
    image_store.ensure_dirs().await.map_err(|e| {
        AppError::Config(format!(
            "Cannot create upload directory {}: {e}",
            config.storage.upload_dir
        ))
    })?;
    info!(upload_dir = %image_store.root().display(), "Image storage ready");

    let jwt_service = Arc::new(JwtService::new(&config.jwt.secret, config.jwt.token_expiry));

    // Create repositories
    let user_repo = Arc::new(PgUserRepository::new(pool.clone()));
    let memorial_repo = Arc::new(PgMemorialRepository::new(pool.clone()));

    // Build service context
    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .memorial_repo(memorial_repo)
        .image_store(Arc::new(image_store))
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();
    let addr = tokio::net::lookup_host(&address)
        .await
        .ok()
        .and_then(|mut addrs| addrs.next())
        .ok_or_else(|| AppError::Config(format!("Invalid listen address {address}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
