use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use super::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub presets: usize,
    pub component_groups: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let report = HealthReport {
        status: "ok",
        presets: state.catalog.list_presets().len(),
        component_groups: state.catalog.list_component_groups().len(),
    };
    debug!(
        "Health check: {} presets, {} component groups",
        report.presets, report.component_groups
    );
    Json(report)
}
