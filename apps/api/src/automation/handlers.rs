use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::automation::{AutomationRequest, AutomationSettings};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AutomationResponse {
    pub success: bool,
    pub message: String,
    pub settings: Option<AutomationSettings>,
}

/// POST /start-automation
pub async fn handle_start_automation(
    State(state): State<AppState>,
    Json(request): Json<AutomationRequest>,
) -> Result<Json<AutomationResponse>, AppError> {
    let settings = state
        .automation
        .start(request, Arc::clone(&state.pipeline))
        .await?;

    Ok(Json(AutomationResponse {
        success: true,
        message: format!("Automation started - posting every {}", settings.interval),
        settings: Some(settings),
    }))
}

/// POST /stop-automation
pub async fn handle_stop_automation(
    State(state): State<AppState>,
) -> Result<Json<AutomationResponse>, AppError> {
    state.automation.stop().await?;

    Ok(Json(AutomationResponse {
        success: true,
        message: "Automation stopped".to_string(),
        settings: None,
    }))
}

/// GET /automation
pub async fn handle_automation_status(
    State(state): State<AppState>,
) -> Json<Option<AutomationSettings>> {
    Json(state.automation.current().await)
}
