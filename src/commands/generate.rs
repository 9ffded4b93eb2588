use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use super::{AppState, ErrorResponse};
use crate::error::ConfiguratorError;
use crate::merger::{ConfigMerger, GenerationRequest};

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub configuration: String,
    pub warnings: Vec<String>,
}

/// POST /generate
///
/// Malformed bodies are rejected by the `Json` extractor before they reach
/// the merger.
pub async fn generate_configuration(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<GenerateResponse>, (StatusCode, Json<ErrorResponse>)> {
    let merger = ConfigMerger::new(&state.catalog);
    match merger.generate(&request) {
        Ok(result) => {
            info!(
                "Generated configuration for preset {} ({} warnings)",
                request.printer_preset_id,
                result.warnings.len()
            );
            Ok(Json(GenerateResponse {
                warnings: result.warning_messages(),
                configuration: result.configuration,
            }))
        }
        Err(err @ ConfiguratorError::UnknownPreset(_)) => {
            info!("Rejected generate request: {}", err);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    preset_id: Some(request.printer_preset_id),
                    error: String::from(err),
                }),
            ))
        }
    }
}
