//! Condition API routes
//!
//! Wound, scar and die clicks on a skill, plus the stress track, drinking and
//! resting. Every endpoint answers with the updated character.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{error_response, parse_character_id, parse_skill};
use crate::application::dto::{
    CharacterResponseDto, SetSkillMaxRequestDto, ToggleScarRequestDto, ToggleStressRequestDto,
    ToggleWoundRequestDto,
};
use crate::application::services::ServiceError;
use crate::domain::entities::Character;
use crate::domain::value_objects::{CharacterId, SkillKey};
use crate::infrastructure::state::AppState;

type ConditionResult = Result<Json<CharacterResponseDto>, (StatusCode, String)>;

fn respond(result: Result<Character, ServiceError>) -> ConditionResult {
    result
        .map(|character| Json(CharacterResponseDto::from(character)))
        .map_err(error_response)
}

fn skill_path(id: &str, skill: &str) -> Result<(CharacterId, SkillKey), (StatusCode, String)> {
    Ok((parse_character_id(id)?, parse_skill(skill)?))
}

/// Click a box on the wound track
pub async fn toggle_wound(
    State(state): State<Arc<AppState>>,
    Path((id, skill)): Path<(String, String)>,
    Json(req): Json<ToggleWoundRequestDto>,
) -> ConditionResult {
    let (id, skill) = skill_path(&id, &skill)?;
    respond(
        state
            .condition_service
            .toggle_wound(id, skill, req.marked)
            .await,
    )
}

/// Click a box on the scar track
pub async fn toggle_scar(
    State(state): State<Arc<AppState>>,
    Path((id, skill)): Path<(String, String)>,
    Json(req): Json<ToggleScarRequestDto>,
) -> ConditionResult {
    let (id, skill) = skill_path(&id, &skill)?;
    let result = match (req.state, req.slot) {
        (Some(slot_state), _) => {
            state
                .condition_service
                .toggle_scar_state(id, skill, slot_state)
                .await
        }
        (None, Some(slot)) => state.condition_service.toggle_scar(id, skill, slot).await,
        (None, None) => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Scar click needs a slot or a state".to_string(),
            ))
        }
    };
    respond(result)
}

pub async fn reduce_die(
    State(state): State<Arc<AppState>>,
    Path((id, skill)): Path<(String, String)>,
) -> ConditionResult {
    let (id, skill) = skill_path(&id, &skill)?;
    respond(state.condition_service.reduce_die(id, skill).await)
}

pub async fn augment_die(
    State(state): State<Arc<AppState>>,
    Path((id, skill)): Path<(String, String)>,
) -> ConditionResult {
    let (id, skill) = skill_path(&id, &skill)?;
    respond(state.condition_service.augment_die(id, skill).await)
}

/// Change the die a skill recovers to
pub async fn set_skill_max(
    State(state): State<Arc<AppState>>,
    Path((id, skill)): Path<(String, String)>,
    Json(req): Json<SetSkillMaxRequestDto>,
) -> ConditionResult {
    let (id, skill) = skill_path(&id, &skill)?;
    respond(
        state
            .condition_service
            .set_skill_max(id, skill, req.max)
            .await,
    )
}

/// Click a box on the stress track
pub async fn toggle_stress(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ToggleStressRequestDto>,
) -> ConditionResult {
    let id = parse_character_id(&id)?;
    respond(state.condition_service.toggle_stress(id, req.active).await)
}

/// Return every unwounded skill to its baseline die
pub async fn restore_skills(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ConditionResult {
    let id = parse_character_id(&id)?;
    respond(state.condition_service.restore_skills(id).await)
}

pub async fn drink(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ConditionResult {
    let id = parse_character_id(&id)?;
    respond(state.condition_service.drink(id).await)
}

pub async fn rest(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ConditionResult {
    let id = parse_character_id(&id)?;
    respond(state.condition_service.rest(id).await)
}

pub async fn toggle_editing_skills(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ConditionResult {
    let id = parse_character_id(&id)?;
    respond(state.condition_service.toggle_editing_skills(id).await)
}
