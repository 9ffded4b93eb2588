//! HTTP commands.
//!
//! Thin axum handlers over the catalog and merger. All handlers share one
//! read-only catalog through `AppState`.

pub mod catalog;
pub mod generate;
pub mod health;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::PresetCatalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<PresetCatalog>,
}

impl AppState {
    pub fn new(catalog: PresetCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Error body returned by every failing handler.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset_id: Option<String>,
}

/// Build the router with CORS (the designer UI is served from elsewhere)
/// and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/presets", get(catalog::list_presets))
        .route("/presets/:id", get(catalog::get_preset))
        .route("/component-groups", get(catalog::list_component_groups))
        .route("/generate", post(generate::generate_configuration))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
