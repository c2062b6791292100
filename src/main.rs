use std::sync::Arc;

use dotenvy::dotenv;

use learnhub::router::init_router;
use learnhub::seed::seed_admin;
use learnhub::state::AppState;
use learnhub_config::AppConfig;
use learnhub_core::file_storage::LocalFileStorage;
use learnhub_observability::init_logging;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let storage = LocalFileStorage::new(
        config.uploads.dir.clone(),
        config.uploads.public_prefix.clone(),
        config.uploads.max_image_size,
    );
    if let Err(err) = storage.ensure_dir().await {
        tracing::error!(error = %err, dir = %config.uploads.dir.display(), "Cannot create uploads directory");
        std::process::exit(1);
    }

    let state = AppState::with_storage(&config, Arc::new(storage));
    if let Err(err) = seed_admin(&state, &config.seed).await {
        tracing::error!(error = %err.message(), "Failed to seed admin user");
    }

    let app = init_router(state);

    let addr = config.server.addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(error = %err, %addr, "Failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(%addr, env = %config.server.env, "Server running");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!(error = %err, "Server error");
        std::process::exit(1);
    }
}
