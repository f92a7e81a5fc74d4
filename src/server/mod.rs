//! Axum-based HTTP gateway for the modstudio backend.
//!
//! This module sets up the HTTP server: it accepts the two image uploads,
//! validates them, hands them to the vision client and maps the outcome to
//! an HTTP response.
//!
//! # Components
//!
//! - `handlers`: Individual endpoints (root, health, metrics, generate).
//! - `middleware`: Request ID tracking and the CORS policy.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use handlers::{HealthResponse, HealthStatus, RootResponse, ROOT_MESSAGE};
pub use routes::{create_router, AppState};
