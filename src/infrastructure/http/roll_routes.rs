//! Roll API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{error_response, parse_character_id, parse_item_id, parse_skill};
use crate::application::dto::RollResponseDto;
use crate::infrastructure::state::AppState;

/// Roll one die of the skill's current size
pub async fn roll_skill(
    State(state): State<Arc<AppState>>,
    Path((id, skill)): Path<(String, String)>,
) -> Result<Json<RollResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let skill = parse_skill(&skill)?;

    let outcome = state
        .roll_service
        .roll_skill(id, skill)
        .await
        .map_err(error_response)?;

    Ok(Json(RollResponseDto::from(outcome)))
}

/// Roll an item's own formula
pub async fn roll_item(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<Json<RollResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let item_id = parse_item_id(&item_id)?;

    let outcome = state
        .roll_service
        .roll_item(id, item_id)
        .await
        .map_err(error_response)?;

    Ok(Json(RollResponseDto::from(outcome)))
}
