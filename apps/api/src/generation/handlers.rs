//! Axum route handlers for the generation API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::pipeline::{Campaign, GenerationRequest, PlatformPost};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CampaignRequest {
    pub topic: String,
}

/// POST /generate-live
///
/// Generates one post. The response is keyed by platform name, as the
/// dashboard expects.
pub async fn handle_generate_live(
    State(state): State<AppState>,
    Json(request): Json<GenerationRequest>,
) -> Result<Json<BTreeMap<String, PlatformPost>>, AppError> {
    request.validate()?;

    let post = state.pipeline.generate_for_platform(&request).await?;

    Ok(Json(BTreeMap::from([(request.platform.to_string(), post)])))
}

/// POST /generate-campaign
///
/// Generates twitter, linkedin and instagram posts for one topic. Individual
/// platform failures are reported inside the campaign, never as an HTTP error.
pub async fn handle_generate_campaign(
    State(state): State<AppState>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<Campaign>, AppError> {
    if request.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    Ok(Json(state.pipeline.generate_campaign(&request.topic).await))
}
