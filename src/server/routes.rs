// HTTP routes configuration
// Author: kelexine (https://github.com/kelexine)

use super::handlers::{generate_handler, health_handler, metrics_handler, root_handler};
use super::middleware::{cors_layer, request_id_layers};
use crate::config::AppConfig;
use crate::error::Result;
use crate::vision::ImageGenerator;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub generator: Arc<dyn ImageGenerator>,
}

pub fn create_router(config: AppConfig, generator: Arc<dyn ImageGenerator>) -> Result<Router> {
    let cors = cors_layer(&config.cors)?;
    let body_limit = config.server.body_limit_bytes;

    let state = AppState { config, generator };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/generate", post(generate_handler))
        // Two full-size photos exceed axum's 2MB default; the configured limit applies instead
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .layer(cors)
        .with_state(state);

    Ok(app)
}
