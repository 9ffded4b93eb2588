use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use super::{AppState, ErrorResponse};
use crate::catalog::{ComponentGroup, Parameter, PresetSummary, PrinterPreset};

/// Component group as shown to the designer UI (snippets stay server-side).
#[derive(Debug, Clone, Serialize)]
pub struct ComponentGroupInfo {
    pub category: String,
    pub label: String,
    pub description: String,
    pub components: Vec<ComponentInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentInfo {
    pub id: String,
    pub label: String,
    pub description: String,
    pub parameters: Vec<Parameter>,
}

impl From<&ComponentGroup> for ComponentGroupInfo {
    fn from(group: &ComponentGroup) -> Self {
        Self {
            category: group.category.clone(),
            label: group.label.clone(),
            description: group.description.clone(),
            components: group
                .components
                .iter()
                .map(|c| ComponentInfo {
                    id: c.id.clone(),
                    label: c.label.clone(),
                    description: c.description.clone(),
                    parameters: c.parameters.clone(),
                })
                .collect(),
        }
    }
}

/// GET /presets
pub async fn list_presets(State(state): State<AppState>) -> Json<Vec<PresetSummary>> {
    Json(state.catalog.list_presets())
}

/// GET /presets/:id
pub async fn get_preset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PrinterPreset>, (StatusCode, Json<ErrorResponse>)> {
    match state.catalog.get_preset(&id) {
        Some(preset) => Ok(Json(preset.clone())),
        None => {
            info!("Preset lookup failed: {}", id);
            Err((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: format!("Unknown printer preset: {}", id),
                    preset_id: Some(id),
                }),
            ))
        }
    }
}

/// GET /component-groups
pub async fn list_component_groups(
    State(state): State<AppState>,
) -> Json<Vec<ComponentGroupInfo>> {
    Json(
        state
            .catalog
            .list_component_groups()
            .iter()
            .map(ComponentGroupInfo::from)
            .collect(),
    )
}
