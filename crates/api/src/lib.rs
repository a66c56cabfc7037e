//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes over the billing engine
//! - JSON error mapping for `BillingError`

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use clinic_core::BillingEngine;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Billing services.
    pub engine: Arc<BillingEngine>,
}

impl AppState {
    /// Wraps an engine.
    #[must_use]
    pub fn new(engine: BillingEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
